//! # Game Module
//!
//! Core simulation state: coordinates, the tile grid, entities, blast propagation,
//! the tick engine and the read-only snapshot it publishes.

pub mod blast;
pub mod engine;
pub mod entities;
pub mod state;
pub mod world;

pub use blast::*;
pub use engine::*;
pub use entities::*;
pub use state::*;
pub use world::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// A continuous point in tile units.
///
/// Tile `(i, j)` covers `[i, i + 1) x [j, j + 1)` and has its center at
/// `(i + 0.5, j + 0.5)`.
///
/// # Examples
///
/// ```
/// use playing_with_fire::{Position, TilePos};
///
/// let pos = Position::new(3.2, 4.9);
/// assert_eq!(pos.tile(), TilePos::new(3, 4));
/// assert_eq!(TilePos::new(3, 4).center(), Position::new(3.5, 4.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the tile containing this position.
    pub fn tile(self) -> TilePos {
        TilePos::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Moves this position `distance` tiles in `direction`.
    pub fn moved(self, direction: Direction, distance: f32) -> Self {
        let (dx, dy) = direction.unit();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

/// Integer tile coordinates.
///
/// Bombs, explosions and power-ups always sit on a tile center, so they are keyed
/// by `TilePos` rather than by a float position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring tile in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// The tile `distance` steps away in `direction`.
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// The center point of this tile.
    pub fn center(self) -> Position {
        Position::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// Calculates the Manhattan distance to another tile.
    pub fn manhattan_distance(self, other: TilePos) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the 4 cardinal neighbors in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [TilePos; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }
}

/// Axis-aligned movement and facing directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the fixed enumeration order used by the planner.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta of one step. `y` grows downwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (0, -1));
    /// assert_eq!(Direction::Right.delta(), (1, 0));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit vector of this direction in continuous space.
    pub fn unit(self) -> (f32, f32) {
        let (dx, dy) = self.delta();
        (dx as f32, dy as f32)
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether this direction moves along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether `other` runs along the other axis.
    pub fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Unique identifier for players.
pub type PlayerId = Uuid;

/// Creates a new unique player ID.
pub fn new_player_id() -> PlayerId {
    Uuid::new_v4()
}

/// Creates a version 4 player ID from the given generator.
pub fn seeded_player_id<R: Rng + ?Sized>(rng: &mut R) -> PlayerId {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Something that happened during a tick.
///
/// Returned from [`Engine::update`] so the presentation layer can react (sounds,
/// flashes, banners) without diffing snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BombPlaced {
        player_id: PlayerId,
        tile: TilePos,
    },
    BombDetonated {
        owner: Option<PlayerId>,
        tile: TilePos,
        affected_tiles: usize,
    },
    WallDestroyed {
        tile: TilePos,
    },
    PowerUpSpawned {
        kind: PowerUpType,
        tile: TilePos,
    },
    PowerUpCollected {
        player_id: PlayerId,
        kind: PowerUpType,
    },
    PlayerDamaged {
        player_id: PlayerId,
        damage: i32,
        remaining_hp: i32,
    },
    RoundWon {
        winner: PlayerId,
        round: u32,
    },
    MatchWon {
        winner: PlayerId,
    },
}
