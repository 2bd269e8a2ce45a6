//! Fixed-step time management for the simulation loop.
//!
//! The clock never reads the wall time itself: the caller feeds it frame
//! deltas, so two participants that feed the same deltas run the same ticks.

use std::time::Duration;

/// Upper bound on catch-up ticks per frame to prevent a spiral of death.
pub const MAX_SUBSTEPS: u32 = 8;

/// Accumulates frame time and hands out fixed simulation ticks.
#[derive(Debug)]
pub struct FixedStep {
    /// Duration of one simulation tick.
    step: Duration,
    /// Accumulated time not yet consumed by ticks.
    accumulator: Duration,
    /// Total simulated time (sum of consumed ticks).
    simulated: Duration,
    /// Ticks consumed since creation.
    tick_count: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::from_rate(60.0)
    }
}

impl FixedStep {
    /// Create a clock ticking at `hz` ticks per second.
    pub fn from_rate(hz: f64) -> Self {
        Self {
            step: Duration::from_secs_f64(1.0 / hz.max(1.0)),
            accumulator: Duration::ZERO,
            simulated: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Feed a frame delta. Returns how many ticks are now due, capped at
    /// [`MAX_SUBSTEPS`]; surplus time beyond the cap is dropped.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame;
        let mut due = 0;
        while self.accumulator >= self.step && due < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            self.simulated += self.step;
            self.tick_count += 1;
            due += 1;
        }
        if due == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::warn!(
                "FixedStep fell behind, dropping {:.3}s of frame time",
                self.accumulator.as_secs_f32()
            );
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Tick length in seconds.
    pub fn step_seconds(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Total simulated time in seconds.
    pub fn simulated_seconds(&self) -> f32 {
        self.simulated.as_secs_f32()
    }

    /// Number of ticks handed out so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Interpolation factor between the last tick and the next one (for rendering).
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }
}
