//! Frame-accumulating countdown for cooldowns and spawn cadence

use serde::{Deserialize, Serialize};

/// Accumulates elapsed seconds and fires once per `duration`.
///
/// Firing resets the elapsed time to zero; any overshoot past the threshold
/// is dropped rather than carried into the next period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
}

impl Timer {
    /// Timer firing every `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Add `seconds` of elapsed time
    pub fn advance(&mut self, seconds: f32) {
        self.elapsed += seconds;
    }

    /// Add one fixed simulation step at `tick_rate` ticks per second
    pub fn advance_fixed(&mut self, tick_rate: u32) {
        assert!(tick_rate > 0, "timer tick rate must be positive");
        self.advance(1.0 / tick_rate as f32);
    }

    /// Add real elapsed time, unless the host's frame rate has dropped below
    /// `min_fps` (a stutter would otherwise fire timers in bursts).
    ///
    /// Returns whether the time was accumulated.
    pub fn advance_real(&mut self, delta_secs: f32, measured_fps: f32, min_fps: f32) -> bool {
        if measured_fps < min_fps {
            return false;
        }
        self.advance(delta_secs);
        true
    }

    /// True once per period; resets elapsed to zero when it fires
    pub fn ticked(&mut self) -> bool {
        if self.elapsed >= self.duration {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
