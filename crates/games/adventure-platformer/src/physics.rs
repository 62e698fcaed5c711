use serde::{Deserialize, Serialize};

use adventure_core::Rect;

/// Gravity acceleration (pixels/s^2, positive is downward).
pub const GRAVITY: f32 = 1200.0;

/// Static level geometry. Never moves once the level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }
}

impl From<Rect> for Platform {
    fn from(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Horizontal heading shared by the player (facing) and enemies (patrol direction).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Kinematics record embedded by every physical entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
        }
    }
}

/// Integrate downward acceleration into vertical velocity.
pub fn apply_gravity(body: &mut Body, gravity: f32, dt: f32) {
    body.vy += gravity * dt;
}

/// Whole-pixel displacement for one tick.
fn step(velocity: f32, dt: f32) -> i32 {
    let d = (velocity * dt).round();
    if d.is_finite() { d as i32 } else { 0 }
}

/// Move a body by its velocity and resolve overlaps against static platforms.
///
/// Motion is resolved in two independent passes, horizontal then vertical.
///
/// Within a pass, platforms are visited in slice order and each overlap is
/// resolved using the body's *current* velocity, which the first snap sets to
/// zero. Later overlaps in the same pass are left unresolved, so the outcome
/// depends on platform order when a body overlaps several at once.
pub fn move_and_collide(body: &mut Body, platforms: &[Platform], dt: f32) {
    // Horizontal
    body.rect.x = body.rect.x.saturating_add(step(body.vx, dt));
    for platform in platforms {
        if body.rect.intersects(&platform.rect) {
            if body.vx > 0.0 {
                body.rect.set_right(platform.rect.left());
            } else if body.vx < 0.0 {
                body.rect.set_left(platform.rect.right());
            }
            body.vx = 0.0;
        }
    }

    // Vertical
    body.on_ground = false;
    body.rect.y = body.rect.y.saturating_add(step(body.vy, dt));
    for platform in platforms {
        if body.rect.intersects(&platform.rect) {
            if body.vy > 0.0 {
                body.rect.set_bottom(platform.rect.top());
                body.on_ground = true;
            } else if body.vy < 0.0 {
                body.rect.set_top(platform.rect.bottom());
            }
            body.vy = 0.0;
        }
    }
}
