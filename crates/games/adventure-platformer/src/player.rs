use serde::{Deserialize, Serialize};

use adventure_core::{Countdown, Rect};

use crate::config::PlayerTuning;
use crate::enemy::{Enemy, EnemyId};
use crate::physics::{Body, Facing, GRAVITY, Platform, apply_gravity, move_and_collide};

/// Directional keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
}

/// The player character.
///
/// Created once per level load and reset in place by [`Player::respawn`], so
/// anything holding on to the player across ticks keeps seeing the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    body: Body,
    tuning: PlayerTuning,
    gravity: f32,
    facing: Facing,
    health: u32,
    invulnerability: Countdown,
    attack_cooldown: Countdown,
    attack_indicator: Countdown,
    last_attack_hitbox: Rect,
    double_jump_charges: u32,
    air_jump_used: bool,
    coyote: Countdown,
    jump_buffer: Countdown,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_tuning(x, y, PlayerTuning::default(), GRAVITY)
    }

    pub fn with_tuning(x: i32, y: i32, tuning: PlayerTuning, gravity: f32) -> Self {
        let body = Body::new(x, y, tuning.width, tuning.height);
        Self {
            last_attack_hitbox: body.rect,
            body,
            health: tuning.max_health,
            tuning,
            gravity,
            facing: Facing::Right,
            invulnerability: Countdown::new(),
            attack_cooldown: Countdown::new(),
            attack_indicator: Countdown::new(),
            double_jump_charges: 0,
            air_jump_used: false,
            coyote: Countdown::new(),
            jump_buffer: Countdown::new(),
        }
    }

    /// Advance one tick from held directions and the jump edge-trigger.
    pub fn update(
        &mut self,
        held: HeldDirections,
        jump_pressed: bool,
        platforms: &[Platform],
        dt: f32,
    ) {
        // Right is checked after left, so holding both runs right.
        self.body.vx = 0.0;
        if held.left {
            self.body.vx = -self.tuning.speed;
        }
        if held.right {
            self.body.vx = self.tuning.speed;
        }

        if self.body.vx > 0.0 {
            self.facing = Facing::Right;
        } else if self.body.vx < 0.0 {
            self.facing = Facing::Left;
        }

        if self.body.on_ground {
            self.coyote.start(self.tuning.coyote_time);
        } else {
            self.coyote.tick(dt);
        }

        if jump_pressed {
            self.jump_buffer.start(self.tuning.jump_buffer_window);
        }

        let can_ground_jump = self.body.on_ground || self.coyote.is_running();
        if can_ground_jump && self.jump_buffer.is_running() {
            self.body.vy = self.tuning.jump_strength;
            self.body.on_ground = false;
            self.air_jump_used = false;
            self.jump_buffer.clear();
            self.coyote.clear();
        } else if jump_pressed && self.double_jump_charges > 0 && !self.air_jump_used {
            self.body.vy = self.tuning.jump_strength;
            self.double_jump_charges = self.double_jump_charges.saturating_sub(1);
            self.air_jump_used = true;
            self.jump_buffer.clear();
        }

        apply_gravity(&mut self.body, self.gravity, dt);
        move_and_collide(&mut self.body, platforms, dt);

        if self.body.on_ground {
            self.air_jump_used = false;
            self.coyote.start(self.tuning.coyote_time);
        }

        self.jump_buffer.tick(dt);
        self.attack_cooldown.tick(dt);
        self.attack_indicator.tick(dt);
        self.invulnerability.tick(dt);
    }

    /// Swing at every enemy inside the hitbox. Returns the ids of enemies
    /// whose health reached zero; removing them is the caller's job.
    pub fn attack(&mut self, enemies: &mut [Enemy]) -> Vec<EnemyId> {
        if self.attack_cooldown.is_running() {
            return Vec::new();
        }
        self.attack_cooldown.start(self.tuning.attack_cooldown);

        let hitbox = self.compute_attack_hitbox();
        self.last_attack_hitbox = hitbox;
        self.attack_indicator.start(self.tuning.attack_indicator_duration);

        enemies
            .iter_mut()
            .filter(|enemy| enemy.rect().intersects(&hitbox))
            .filter_map(|enemy| enemy.take_damage(1).then_some(enemy.id()))
            .collect()
    }

    fn compute_attack_hitbox(&self) -> Rect {
        let (inflate_w, inflate_h) = self.tuning.attack_inflate;
        let reach = self.tuning.attack_reach;
        let mut hitbox = self.body.rect.inflate(inflate_w, inflate_h);
        if self.facing == Facing::Left {
            hitbox.x -= reach;
        }
        hitbox.width += reach;
        hitbox
    }

    /// Apply damage unless invulnerable. Returns `true` iff this hit killed the player.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invulnerability.is_running() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health > 0 {
            self.invulnerability.start(self.tuning.invulnerability_time);
        }
        self.health == 0
    }

    /// Drop health to zero regardless of invulnerability (falling out of the world).
    pub fn kill(&mut self) {
        self.health = 0;
    }

    /// Reset in place at `position` (top-left) with full health and no
    /// timers, charges, or velocity.
    pub fn respawn(&mut self, position: (i32, i32)) {
        self.body.rect.set_top_left(position);
        self.body.vx = 0.0;
        self.body.vy = 0.0;
        self.body.on_ground = false;
        self.health = self.tuning.max_health;
        self.invulnerability.clear();
        self.attack_cooldown.clear();
        self.attack_indicator.clear();
        self.double_jump_charges = 0;
        self.air_jump_used = false;
        self.jump_buffer.clear();
        self.coyote.clear();
    }

    pub fn add_double_jump_charge(&mut self, n: i32) {
        self.double_jump_charges = self.double_jump_charges.saturating_add(n.max(0) as u32);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Visual-only flag: true for a short while after a swing.
    pub fn is_attacking(&self) -> bool {
        self.attack_indicator.is_running()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_running()
    }

    pub fn attack_hitbox(&self) -> Rect {
        self.last_attack_hitbox
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.tuning.max_health
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn double_jump_charges(&self) -> u32 {
        self.double_jump_charges
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }
}
