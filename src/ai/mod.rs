//! # AI Module
//!
//! Decision-making for autonomous players.
//!
//! A behavior looks at a [`GameState`] snapshot and answers with a single
//! [`Move`]. It never mutates the simulation; the engine applies the move.

pub mod behavior;
pub mod danger;

pub use behavior::*;
pub use danger::*;

use crate::{Direction, GameState, Player};
use serde::{Deserialize, Serialize};

/// What an autonomous player wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    PlaceBomb,
    /// Stop moving
    DoNothing,
    /// Keep whatever the player is currently doing
    NoChange,
}

impl Move {
    /// The movement direction, if this is a step.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Move::Up => Some(Direction::Up),
            Move::Down => Some(Direction::Down),
            Move::Left => Some(Direction::Left),
            Move::Right => Some(Direction::Right),
            Move::PlaceBomb | Move::DoNothing | Move::NoChange => None,
        }
    }
}

impl From<Direction> for Move {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Move::Up,
            Direction::Down => Move::Down,
            Direction::Left => Move::Left,
            Direction::Right => Move::Right,
        }
    }
}

/// Decision policy for an autonomous player.
pub trait Behavior {
    /// Chooses the next move for `player` given the current snapshot.
    fn decide_move(&self, player: &Player, state: &GameState) -> Move;
}

/// The behaviors a player can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Survive, trap, clear walls, collect power-ups, then hunt
    Chase,
}

impl Behavior for BehaviorKind {
    fn decide_move(&self, player: &Player, state: &GameState) -> Move {
        match self {
            BehaviorKind::Chase => ChaseBehavior.decide_move(player, state),
        }
    }
}
