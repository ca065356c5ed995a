//! # Tile-Space Mathematics
//!
//! Helpers for reasoning about continuous positions relative to the tile grid.

use crate::config::CENTER_TOLERANCE;
use crate::Position;

/// Fractional part of a coordinate, always in `[0, 1)`.
pub fn fraction(value: f32) -> f32 {
    value - value.floor()
}

/// Tile index a body of `radius` overlaps along one axis.
///
/// A body hanging over the lower edge of its tile reports the tile below, one
/// hanging over the upper edge reports the tile above, otherwise its own tile.
///
/// # Examples
///
/// ```
/// use playing_with_fire::occupied_tile;
///
/// assert_eq!(occupied_tile(3.5, 0.45), 3);
/// assert_eq!(occupied_tile(3.2, 0.45), 2);
/// assert_eq!(occupied_tile(3.9, 0.45), 4);
/// ```
pub fn occupied_tile(value: f32, radius: f32) -> i32 {
    let offset = fraction(value);
    if offset < radius {
        (value - radius).floor() as i32
    } else if offset > 1.0 - radius {
        (value + radius).floor() as i32
    } else {
        value.floor() as i32
    }
}

/// Whether a position sits on a tile center on both axes.
pub fn is_tile_centered(position: Position) -> bool {
    (fraction(position.x) - 0.5).abs() < CENTER_TOLERANCE
        && (fraction(position.y) - 0.5).abs() < CENTER_TOLERANCE
}
