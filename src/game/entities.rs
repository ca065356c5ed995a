//! # Entities
//!
//! Plain state records for everything that lives on the grid: players, bombs,
//! explosion segments and power-ups.

use crate::config::*;
use crate::{new_player_id, BehaviorKind, Direction, PlayerId, Position, TilePos};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a player is currently trying to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
}

/// A combatant.
///
/// Identity and the win tally persist for the whole match; everything else is
/// restored to defaults by [`Player::reset_for_round`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Where the player starts every round
    pub spawn: Position,
    /// Collision diameter as a fraction of a tile
    pub size: f32,
    pub hp: i32,
    /// Remaining bomb placement charges
    pub bomb_count: u32,
    /// Blast radius in tiles
    pub fire_range: u32,
    /// Tiles per second
    pub speed: f32,
    pub direction: Direction,
    pub state: PlayerState,
    /// Rounds won this match
    pub wins: u32,
    /// Bombs placed by this player that have not detonated yet
    pub bombs: Vec<BombId>,
    /// Decision policy for autonomous players, `None` for human input
    pub behavior: Option<BehaviorKind>,
}

impl Player {
    /// Creates a human-controlled player with round defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::{Player, Position};
    ///
    /// let player = Player::new("Hero".to_string(), Position::new(1.5, 1.5));
    /// assert_eq!(player.hp, 100);
    /// assert!(player.is_alive());
    /// assert!(!player.is_autonomous());
    /// ```
    pub fn new(name: String, position: Position) -> Self {
        Self {
            id: new_player_id(),
            name,
            position,
            spawn: position,
            size: PLAYER_SIZE,
            hp: STARTING_HP,
            bomb_count: STARTING_BOMB_COUNT,
            fire_range: STARTING_FIRE_RANGE,
            speed: STARTING_SPEED,
            direction: Direction::Left,
            state: PlayerState::Idle,
            wins: 0,
            bombs: Vec::new(),
            behavior: None,
        }
    }

    /// Creates a player driven by `behavior`.
    pub fn autonomous(name: String, position: Position, behavior: BehaviorKind) -> Self {
        Self {
            behavior: Some(behavior),
            ..Self::new(name, position)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_autonomous(&self) -> bool {
        self.behavior.is_some()
    }

    /// Collision radius in tiles.
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// The tile under the player's center.
    pub fn tile(&self) -> TilePos {
        self.position.tile()
    }

    /// Starts moving in `direction`.
    pub fn run(&mut self, direction: Direction) {
        self.direction = direction;
        self.state = PlayerState::Running;
    }

    pub fn stop(&mut self) {
        self.state = PlayerState::Idle;
    }

    /// Removes hit points, never going below zero.
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage).clamp(0, STARTING_HP);
    }

    /// Applies a collected power-up.
    pub fn apply_power_up(&mut self, kind: PowerUpType) {
        match kind {
            PowerUpType::FireRange => self.fire_range += 1,
            PowerUpType::ExtraBomb => self.bomb_count += 1,
            PowerUpType::Speed => self.speed = (self.speed * SPEED_MULTIPLIER).min(MAX_SPEED),
        }
    }

    /// Moves back to the spawn point and restores per-round stats.
    pub fn reset_for_round(&mut self) {
        self.position = self.spawn;
        self.hp = STARTING_HP;
        self.bomb_count = STARTING_BOMB_COUNT;
        self.fire_range = STARTING_FIRE_RANGE;
        self.speed = STARTING_SPEED;
        self.direction = Direction::Left;
        self.state = PlayerState::Idle;
        self.bombs.clear();
    }
}

/// Identifier of a placed bomb, unique within an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombId(pub u64);

/// A ticking bomb sitting on a tile center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: BombId,
    pub tile: TilePos,
    /// Blast radius in tiles
    pub range: u32,
    /// Seconds until detonation
    pub remaining_time: f64,
}

impl Bomb {
    /// Creates a bomb with a full fuse.
    pub fn new(id: BombId, tile: TilePos, range: u32) -> Self {
        Self {
            id,
            tile,
            range,
            remaining_time: BOMB_FUSE_SECONDS,
        }
    }

    pub fn position(&self) -> Position {
        self.tile.center()
    }
}

/// Shape of one tile's share of a blast. Only a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Center,
    Middle,
    Outer,
}

/// One tile of a live blast.
///
/// Each record damages a given player at most once, no matter how many ticks the
/// player spends inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub tile: TilePos,
    /// Direction the blast travelled to reach this tile; `None` at the origin
    pub direction: Option<Direction>,
    pub segment: SegmentKind,
    /// Seconds until this record disappears
    pub remaining_time: f64,
    /// Players already hurt by this record
    pub damaged: HashSet<PlayerId>,
}

impl Explosion {
    pub fn new(tile: TilePos, direction: Option<Direction>, segment: SegmentKind) -> Self {
        Self {
            tile,
            direction,
            segment,
            remaining_time: EXPLOSION_SECONDS,
            damaged: HashSet::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.tile.center()
    }

    pub fn has_damaged(&self, player_id: PlayerId) -> bool {
        self.damaged.contains(&player_id)
    }
}

/// Upgrade kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpType {
    ExtraBomb,
    FireRange,
    Speed,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 3] = [
        PowerUpType::ExtraBomb,
        PowerUpType::FireRange,
        PowerUpType::Speed,
    ];
}

/// A collectible upgrade left behind by a destroyed wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpType,
    pub tile: TilePos,
}

impl PowerUp {
    pub fn new(kind: PowerUpType, tile: TilePos) -> Self {
        Self { kind, tile }
    }

    pub fn position(&self) -> Position {
        self.tile.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_defaults() {
        let player = Player::new("Test".to_string(), Position::new(1.5, 1.5));
        assert_eq!(player.bomb_count, STARTING_BOMB_COUNT);
        assert_eq!(player.fire_range, STARTING_FIRE_RANGE);
        assert_eq!(player.speed, STARTING_SPEED);
        assert_eq!(player.state, PlayerState::Idle);
        assert_eq!(player.tile(), TilePos::new(1, 1));
        assert!((player.radius() - 0.45).abs() < f32::EPSILON);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut player = Player::new("Test".to_string(), Position::new(1.5, 1.5));
        player.take_damage(EXPLOSION_DAMAGE);
        assert_eq!(player.hp, 68);
        for _ in 0..5 {
            player.take_damage(EXPLOSION_DAMAGE);
        }
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_power_up_effects() {
        let mut player = Player::new("Test".to_string(), Position::new(1.5, 1.5));
        player.apply_power_up(PowerUpType::FireRange);
        player.apply_power_up(PowerUpType::ExtraBomb);
        player.apply_power_up(PowerUpType::Speed);
        assert_eq!(player.fire_range, 2);
        assert_eq!(player.bomb_count, 2);
        assert!((player.speed - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut player = Player::new("Test".to_string(), Position::new(1.5, 1.5));
        for _ in 0..20 {
            player.apply_power_up(PowerUpType::Speed);
        }
        assert_eq!(player.speed, MAX_SPEED);
    }

    #[test]
    fn test_reset_keeps_identity_and_wins() {
        let mut player = Player::new("Test".to_string(), Position::new(1.5, 1.5));
        let id = player.id;
        player.wins = 1;
        player.hp = 4;
        player.fire_range = 5;
        player.position = Position::new(6.5, 3.5);
        player.bombs.push(BombId(7));
        player.run(Direction::Down);

        player.reset_for_round();

        assert_eq!(player.id, id);
        assert_eq!(player.wins, 1);
        assert_eq!(player.hp, STARTING_HP);
        assert_eq!(player.fire_range, STARTING_FIRE_RANGE);
        assert_eq!(player.position, Position::new(1.5, 1.5));
        assert!(player.bombs.is_empty());
        assert_eq!(player.state, PlayerState::Idle);
    }

    #[test]
    fn test_bomb_and_explosion_timers_start_full() {
        let bomb = Bomb::new(BombId(1), TilePos::new(2, 3), 2);
        assert_eq!(bomb.remaining_time, BOMB_FUSE_SECONDS);
        assert_eq!(bomb.position(), Position::new(2.5, 3.5));

        let explosion = Explosion::new(TilePos::new(2, 3), None, SegmentKind::Center);
        assert_eq!(explosion.remaining_time, EXPLOSION_SECONDS);
        assert!(explosion.damaged.is_empty());
    }
}
