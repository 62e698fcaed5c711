use serde::{Deserialize, Serialize};

use adventure_core::Rect;

use crate::config::EnemyTuning;
use crate::physics::{Body, Facing, GRAVITY, Platform, apply_gravity, move_and_collide};

/// Stable identifier for an enemy within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Horizontal span an enemy walks back and forth across, in world x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolRange {
    pub min_x: i32,
    pub max_x: i32,
}

/// A patrolling enemy with hit points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    id: EnemyId,
    body: Body,
    gravity: f32,
    health: i32,
    patrol: PatrolRange,
    direction: Facing,
    speed: f32,
}

impl Enemy {
    /// Spawn an enemy at `(x, y)` heading right. Health is raised to the
    /// tuning's minimum.
    pub fn new(
        id: EnemyId,
        x: i32,
        y: i32,
        patrol: PatrolRange,
        speed: f32,
        health: i32,
        tuning: &EnemyTuning,
    ) -> Self {
        Self {
            id,
            body: Body::new(x, y, tuning.width, tuning.height),
            gravity: GRAVITY,
            health: health.max(tuning.min_health),
            patrol,
            direction: Facing::Right,
            speed,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Walk the patrol, fall under gravity, and turn around at the range ends.
    pub fn update(&mut self, platforms: &[Platform], dt: f32) {
        self.body.vx = self.speed * self.direction.sign();

        apply_gravity(&mut self.body, self.gravity, dt);
        move_and_collide(&mut self.body, platforms, dt);

        if self.body.rect.left() <= self.patrol.min_x {
            self.body.rect.set_left(self.patrol.min_x);
            self.direction = Facing::Right;
        } else if self.body.rect.right() >= self.patrol.max_x {
            self.body.rect.set_right(self.patrol.max_x);
            self.direction = Facing::Left;
        }

        self.body.vx = self.speed * self.direction.sign();
    }

    /// Apply damage. Returns `true` once health has reached zero or below.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn patrol(&self) -> PatrolRange {
        self.patrol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ground() -> Vec<Platform> {
        vec![Platform::new(0, 500, 1000, 100)]
    }

    fn walker(x: i32, min_x: i32, max_x: i32) -> Enemy {
        Enemy::new(
            EnemyId(0),
            x,
            450,
            PatrolRange { min_x, max_x },
            120.0,
            3,
            &EnemyTuning::default(),
        )
    }

    #[test]
    fn health_is_raised_to_minimum() {
        let tuning = EnemyTuning::default();
        let range = PatrolRange {
            min_x: 0,
            max_x: 100,
        };
        let weak = Enemy::new(EnemyId(1), 0, 0, range, 120.0, 1, &tuning);
        assert_eq!(weak.health(), 2);
        let strong = Enemy::new(EnemyId(2), 0, 0, range, 120.0, 5, &tuning);
        assert_eq!(strong.health(), 5);
    }

    #[test]
    fn patrol_reaches_right_bound_and_reverses_in_time() {
        let platforms = ground();
        let mut enemy = walker(150, 100, 300);
        let budget = (300.0 - 150.0) / 120.0;
        let mut t = 0.0;
        while enemy.direction() == Facing::Right {
            enemy.update(&platforms, DT);
            t += DT;
            assert!(t <= budget + DT, "Enemy failed to turn around within {budget}s");
        }
        assert_eq!(enemy.rect().right(), 300, "Right edge clamps to the patrol max");
        assert!(
            enemy.body().vx < 0.0,
            "Velocity is re-derived from the flipped direction in the same tick"
        );
    }

    #[test]
    fn patrol_reverses_at_left_bound() {
        let platforms = ground();
        let mut enemy = walker(150, 100, 300);
        // Walk to the right end first, then all the way back.
        for _ in 0..600 {
            enemy.update(&platforms, DT);
            if enemy.direction() == Facing::Left {
                break;
            }
        }
        for _ in 0..600 {
            enemy.update(&platforms, DT);
            if enemy.direction() == Facing::Right {
                break;
            }
        }
        assert_eq!(enemy.direction(), Facing::Right);
        assert_eq!(enemy.rect().left(), 100);
    }

    #[test]
    fn enemy_stays_inside_patrol_range() {
        let platforms = ground();
        let mut enemy = walker(150, 100, 300);
        for _ in 0..1200 {
            enemy.update(&platforms, DT);
            assert!(enemy.rect().left() >= 100);
            assert!(enemy.rect().right() <= 300);
        }
    }

    #[test]
    fn enemy_falls_onto_ground() {
        let platforms = ground();
        let mut enemy = Enemy::new(
            EnemyId(0),
            200,
            300,
            PatrolRange {
                min_x: 100,
                max_x: 400,
            },
            120.0,
            3,
            &EnemyTuning::default(),
        );
        for _ in 0..120 {
            enemy.update(&platforms, DT);
        }
        assert_eq!(enemy.rect().bottom(), 500);
    }

    #[test]
    fn damage_is_unconditional() {
        let mut enemy = walker(150, 100, 300);
        assert!(!enemy.take_damage(1));
        assert!(!enemy.take_damage(1), "Enemies have no invulnerability window");
        assert!(enemy.take_damage(1));
        assert_eq!(enemy.health(), 0);
        assert!(enemy.take_damage(1), "Further damage keeps reporting defeat");
        assert_eq!(enemy.health(), -1);
    }
}
