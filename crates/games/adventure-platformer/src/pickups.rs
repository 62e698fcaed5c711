use serde::{Deserialize, Serialize};

use adventure_core::{Accumulator, Rect};

use crate::config::OrbTuning;

/// Collectible granting one double-jump charge. Reappears after a delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyOrb {
    rect: Rect,
    respawn_delay: f32,
    active: bool,
    timer: Accumulator,
}

impl EnergyOrb {
    pub fn new(rect: Rect, respawn_delay: f32) -> Self {
        Self {
            rect,
            respawn_delay,
            active: true,
            timer: Accumulator::default(),
        }
    }

    pub fn from_center(cx: i32, cy: i32, tuning: &OrbTuning) -> Self {
        Self::new(
            Rect::from_center(cx, cy, tuning.diameter, tuning.diameter),
            tuning.respawn_delay,
        )
    }

    /// Deactivate and restart the respawn clock. Calling it again while
    /// inactive only restarts the clock.
    pub fn collect(&mut self) {
        self.active = false;
        self.timer.reset();
    }

    pub fn update(&mut self, dt: f32) {
        if self.active {
            return;
        }
        if self.timer.advance(dt, self.respawn_delay) {
            self.active = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Seconds accumulated since collection.
    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }
}

/// One-shot trigger that moves the respawn point forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    trigger: Rect,
    respawn: (i32, i32),
    reached: bool,
}

impl Checkpoint {
    pub fn new(trigger: Rect, respawn: (i32, i32)) -> Self {
        Self {
            trigger,
            respawn,
            reached: false,
        }
    }

    /// Returns `true` only on the first touch.
    pub fn try_reach(&mut self, rect: &Rect) -> bool {
        if self.reached || !self.trigger.intersects(rect) {
            return false;
        }
        self.reached = true;
        true
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    pub fn respawn_point(&self) -> (i32, i32) {
        self.respawn
    }

    pub fn trigger(&self) -> &Rect {
        &self.trigger
    }
}

/// Region that ends the run in victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishZone {
    pub rect: Rect,
}

impl FinishZone {
    pub fn is_touched_by(&self, rect: &Rect) -> bool {
        self.rect.intersects(rect)
    }
}
