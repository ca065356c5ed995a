//! # Playing With Fire
//!
//! A real-time, tile-based arena combat simulation. Two agents (a human-controlled
//! avatar and an autonomous opponent) move on a grid, place time-delayed bombs,
//! destroy obstacles, collect upgrades and damage each other until a match winner
//! is determined.
//!
//! ## Architecture Overview
//!
//! - **Game**: grid, entities, blast propagation and the [`Engine`] that owns all
//!   live state and advances it one fixed tick at a time
//! - **Generation**: seeded arena generation with reserved spawn pockets
//! - **AI**: danger-zone classification and the bot's decision policy
//! - **Utils**: the cost-weighted route planner and tile-space arithmetic
//! - **Input**: a thread-safe event queue drained at the start of each tick
//!
//! Rendering, animation and screen navigation live outside this crate. They feed
//! [`InputEvent`]s into the [`InputQueue`] and read back a [`GameState`] snapshot
//! after each tick.

pub mod ai;
pub mod game;
pub mod generation;
pub mod input;
pub mod runner;
pub mod utils;

// Core module re-exports
pub use ai::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use runner::*;
pub use utils::*;

/// Core error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum FireError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the crate.
pub type FireResult<T> = Result<T, FireError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Round and match parameters.
///
/// These are compiled in rather than loaded from a file; they are public so
/// scenarios and tests can reason about exact values.
pub mod config {
    /// Arena width in tiles
    pub const GRID_WIDTH: i32 = 17;

    /// Arena height in tiles
    pub const GRID_HEIGHT: i32 = 12;

    /// Breakable walls placed per round
    pub const BREAKABLE_WALLS: usize = 55;

    /// Unbreakable walls placed per round, in addition to the border
    pub const UNBREAKABLE_WALLS: usize = 33;

    /// Seconds between bomb placement and detonation
    pub const BOMB_FUSE_SECONDS: f64 = 3.0;

    /// Seconds an explosion record stays live
    pub const EXPLOSION_SECONDS: f64 = 1.5;

    /// Round wins needed to take the match
    pub const WIN_THRESHOLD: u32 = 2;

    /// Hit points removed by one explosion record
    pub const EXPLOSION_DAMAGE: i32 = 32;

    /// Hit points at the start of every round
    pub const STARTING_HP: i32 = 100;

    /// Bomb charges at the start of every round
    pub const STARTING_BOMB_COUNT: u32 = 1;

    /// Blast radius in tiles at the start of every round
    pub const STARTING_FIRE_RANGE: u32 = 1;

    /// Movement speed in tiles per second at the start of every round
    pub const STARTING_SPEED: f32 = 2.0;

    /// Speed cap for the speed power-up
    pub const MAX_SPEED: f32 = 25.0;

    /// Factor applied to speed by the speed power-up
    pub const SPEED_MULTIPLIER: f32 = 1.5;

    /// Collision diameter of a player as a fraction of a tile
    pub const PLAYER_SIZE: f32 = 0.9;

    /// A destroyed breakable wall drops a power-up with probability
    /// `POWER_UP_CHANCE_NUMERATOR / POWER_UP_CHANCE_DENOMINATOR`
    pub const POWER_UP_CHANCE_NUMERATOR: u32 = 1;
    pub const POWER_UP_CHANCE_DENOMINATOR: u32 = 3;

    /// Gap left between a blocked player and the wall it ran into
    pub const COLLISION_EPSILON: f32 = 0.01;

    /// How far from a tile center the bot may be and still count as aligned
    pub const CENTER_TOLERANCE: f32 = 0.05;

    /// Longest route to safety that still counts as an escape
    pub const ESCAPE_ROUTE_LIMIT: usize = 3;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Maximum ticks run for a single frame to prevent a spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
