use serde::{Deserialize, Serialize};

use adventure_core::Rect;

use crate::level::WorldSize;

/// Side-scrolling camera. Tracks a target and never shows outside the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// World position of the viewport's top-left corner.
    pub offset: (i32, i32),
}

impl Camera {
    pub fn new(viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            offset: (0, 0),
        }
    }

    /// Center on `target`, clamped so the viewport stays inside the world.
    pub fn follow(&mut self, target: &Rect, world: WorldSize) {
        let (cx, cy) = target.center();
        self.offset = (
            clamp_axis(cx - self.viewport_width / 2, world.width - self.viewport_width),
            clamp_axis(cy - self.viewport_height / 2, world.height - self.viewport_height),
        );
    }

    /// Translate a world rectangle into screen space.
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translate(-self.offset.0, -self.offset.1)
    }

    /// Whether any part of `rect` is on screen.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        let view = Rect::new(
            self.offset.0,
            self.offset.1,
            self.viewport_width,
            self.viewport_height,
        );
        view.intersects(rect)
    }
}

fn clamp_axis(value: i32, max: i32) -> i32 {
    // A world narrower than the viewport pins the camera at the origin.
    value.clamp(0, max.max(0))
}
