//! # Fixed-Step Runner
//!
//! Turns irregular frame times into whole simulation ticks of a fixed size.

use crate::config::{MAX_SUBSTEPS, SIM_DT};
use crate::{Engine, GameEvent};

/// Fixed-timestep accumulator driving an [`Engine`].
///
/// # Examples
///
/// ```
/// use playing_with_fire::{Engine, FixedStepRunner};
///
/// let mut engine = Engine::standard_match(3).unwrap();
/// let mut runner = FixedStepRunner::new();
/// runner.advance(&mut engine, 0.05);
/// assert_eq!(runner.ticks(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStepRunner {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
    ticks: u64,
}

impl Default for FixedStepRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStepRunner {
    /// 60 Hz with the standard substep cap.
    pub fn new() -> Self {
        Self::with_step(SIM_DT, MAX_SUBSTEPS)
    }

    pub fn with_step(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since creation.
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    /// Adds `frame_dt` seconds of wall-clock time and runs every whole tick that
    /// fits, up to the substep cap. Time beyond the cap is dropped.
    pub fn advance(&mut self, engine: &mut Engine, frame_dt: f64) -> Vec<GameEvent> {
        self.accumulator += frame_dt.max(0.0);

        let mut events = Vec::new();
        let mut substeps = 0;
        // Tolerate rounding so 3 x (1/60) frames yield exactly 3 ticks
        let threshold = self.step - 1e-9;
        while self.accumulator >= threshold && substeps < self.max_substeps {
            events.extend(engine.update(self.step));
            self.accumulator -= self.step;
            substeps += 1;
            self.ticks += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= threshold {
            log::trace!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        self.accumulator = self.accumulator.max(0.0);

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, Player, Position};

    fn idle_engine() -> Engine {
        let grid = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
        let mut engine = Engine::from_grid(grid, 1);
        engine.spawn_player(Player::new("Hero".to_string(), Position::new(1.5, 1.5)));
        engine
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut engine = idle_engine();
        let mut runner = FixedStepRunner::new();

        runner.advance(&mut engine, SIM_DT / 2.0);
        assert_eq!(runner.ticks(), 0);
        runner.advance(&mut engine, SIM_DT / 2.0);
        assert_eq!(runner.ticks(), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut engine = idle_engine();
        let mut runner = FixedStepRunner::new();

        runner.advance(&mut engine, 1.0);
        assert_eq!(runner.ticks(), MAX_SUBSTEPS as u64);

        // The backlog is gone, so a tiny frame runs nothing
        runner.advance(&mut engine, SIM_DT / 4.0);
        assert_eq!(runner.ticks(), MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_elapsed_tracks_ticks() {
        let mut engine = idle_engine();
        let mut runner = FixedStepRunner::with_step(0.1, 100);
        runner.advance(&mut engine, 1.0);
        assert_eq!(runner.ticks(), 10);
        assert!((runner.elapsed() - 1.0).abs() < 1e-9);
    }
}
