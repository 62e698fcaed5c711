use serde::{Deserialize, Serialize};

/// A timer that counts down toward zero and never goes negative.
///
/// Used for grace windows (coyote time, jump buffering), cooldowns, and
/// short-lived flags such as invulnerability frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the countdown at `duration` seconds.
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// A timer that accumulates elapsed time until it reaches a fixed delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    elapsed: f32,
}

impl Accumulator {
    /// Add `dt` and report whether `delay` has been reached. On reaching the
    /// delay the accumulator resets to zero.
    pub fn advance(&mut self, dt: f32, delay: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= delay {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
