//! # Game State Module
//!
//! The read-only snapshot published after every tick.
//!
//! A [`GameState`] is a value copy of the engine's live data. Consumers may hold,
//! mutate or serialize it freely; nothing they do reaches the simulation.

use crate::{Bomb, Explosion, FireResult, Grid, Player, PlayerId, PowerUp, TilePos};
use serde::{Deserialize, Serialize};

/// Snapshot of one moment of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub players: Vec<Player>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub power_ups: Vec<PowerUp>,
    /// Current round, starting at 1
    pub round: u32,
    /// Set once a player reaches the win threshold
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Looks up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Players other than `id`.
    pub fn opponents_of(&self, id: PlayerId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |player| player.id != id)
    }

    pub fn bomb_at(&self, tile: TilePos) -> Option<&Bomb> {
        self.bombs.iter().find(|bomb| bomb.tile == tile)
    }

    pub fn is_exploding(&self, tile: TilePos) -> bool {
        self.explosions.iter().any(|explosion| explosion.tile == tile)
    }

    pub fn power_up_at(&self, tile: TilePos) -> Option<&PowerUp> {
        self.power_ups.iter().find(|power_up| power_up.tile == tile)
    }

    pub fn is_match_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Serializes the snapshot to JSON.
    pub fn to_json(&self) -> FireResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a snapshot from JSON.
    pub fn from_json(json: &str) -> FireResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
