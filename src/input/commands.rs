//! # Input Events
//!
//! The events the presentation layer may feed into a match.

use crate::Direction;
use serde::{Deserialize, Serialize};

/// One user action, applied to the first human-controlled player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start running in a direction
    DirectionPress(Direction),
    /// Stop running
    DirectionRelease,
    /// Drop a bomb on the current tile
    BombPress,
}

impl InputEvent {
    /// Maps a keyboard character to an event.
    ///
    /// `w a s d` run, `x` stops, `b` bombs. Case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::{Direction, InputEvent};
    ///
    /// assert_eq!(InputEvent::from_key('W'), Some(InputEvent::DirectionPress(Direction::Up)));
    /// assert_eq!(InputEvent::from_key('q'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(InputEvent::DirectionPress(Direction::Up)),
            's' => Some(InputEvent::DirectionPress(Direction::Down)),
            'a' => Some(InputEvent::DirectionPress(Direction::Left)),
            'd' => Some(InputEvent::DirectionPress(Direction::Right)),
            'x' => Some(InputEvent::DirectionRelease),
            'b' => Some(InputEvent::BombPress),
            _ => None,
        }
    }
}
