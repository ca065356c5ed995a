//! # Input Module
//!
//! Buffering of user input between asynchronous producers and the tick.
//!
//! Producers (UI callbacks, a stdin reader task) push [`InputEvent`]s at any
//! time from any thread. The engine drains the whole queue at the start of one
//! tick, so an event is never applied mid-tick.

pub mod commands;

pub use commands::*;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Thread-safe FIFO of pending input. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl InputQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&self, event: InputEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(event);
    }

    /// Removes and returns everything queued, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use std::thread;

    #[test]
    fn test_drain_preserves_order() {
        let queue = InputQueue::new();
        queue.push(InputEvent::DirectionPress(Direction::Up));
        queue.push(InputEvent::BombPress);

        assert_eq!(
            queue.drain(),
            vec![InputEvent::DirectionPress(Direction::Up), InputEvent::BombPress]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clones_share_buffer() {
        let queue = InputQueue::new();
        let producers: Vec<_> = (0..4)
            .map(|_| {
                let handle = queue.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        handle.push(InputEvent::BombPress);
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        assert_eq!(queue.len(), 100);
        assert_eq!(queue.drain().len(), 100);
    }
}
