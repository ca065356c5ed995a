//! # Utilities Module
//!
//! Tile-space arithmetic and the cost-weighted route planner.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
