pub mod camera;
pub mod config;
pub mod enemy;
pub mod level;
pub mod physics;
pub mod pickups;
pub mod player;

use serde::{Deserialize, Serialize};

use adventure_core::sim_trait::{SimMetadata, Simulation};
use adventure_core::simulation_boilerplate;

use config::PlatformerConfig;
use enemy::{Enemy, EnemyId, PatrolRange};
use level::{LevelData, LevelError, WorldSize, level_one};
use physics::Platform;
use pickups::{Checkpoint, EnergyOrb, FinishZone};
use player::{HeldDirections, Player};

/// Input sampled by the host for one tick. `jump_pressed` and
/// `attack_pressed` are edge triggers, true only on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
}

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Defeated,
    FellOutOfBounds,
}

/// Where the run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    InProgress,
    Victory,
    Defeated { cause: DeathCause },
}

/// Events emitted by a run tick for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    EnemyDefeated { id: EnemyId },
    PlayerHurt { health: u32 },
    OrbCollected { index: usize },
    CheckpointReached { respawn: (i32, i32) },
    PlayerDied { cause: DeathCause },
    Victory { elapsed: f32 },
}

/// Mutable run state; this is what snapshots capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub orbs: Vec<EnergyOrb>,
    pub checkpoint: Option<Checkpoint>,
    pub respawn_point: (i32, i32),
    pub elapsed: f32,
    pub outcome: RunOutcome,
}

impl RunState {
    pub fn is_over(&self) -> bool {
        self.outcome != RunOutcome::InProgress
    }
}

/// One play-through of a level.
pub struct AdventureRun {
    platforms: Vec<Platform>,
    finish: FinishZone,
    world: WorldSize,
    config: PlatformerConfig,
    state: RunState,
    paused: bool,
}

impl AdventureRun {
    /// The built-in first level with default tuning.
    pub fn new() -> Self {
        Self::from_level(&level_one(), PlatformerConfig::default())
    }

    /// Validate `level` and build a run from it.
    pub fn load(level: &LevelData, config: PlatformerConfig) -> Result<Self, LevelError> {
        level.validate()?;
        Ok(Self::from_level(level, config))
    }

    /// Build a run from level data that is already known to be valid.
    pub fn from_level(level: &LevelData, config: PlatformerConfig) -> Self {
        let gravity = config.physics.gravity;
        let (start_x, start_y) = level.player_start;
        let player = Player::with_tuning(start_x, start_y, config.player.clone(), gravity);

        let enemies = level
            .enemies
            .iter()
            .enumerate()
            .map(|(i, spawn)| {
                Enemy::new(
                    EnemyId(i as u32),
                    spawn.x,
                    spawn.y,
                    PatrolRange {
                        min_x: spawn.min_x,
                        max_x: spawn.max_x,
                    },
                    spawn.speed.unwrap_or(config.enemy.speed),
                    spawn.health.unwrap_or(config.enemy.health),
                    &config.enemy,
                )
                .with_gravity(gravity)
            })
            .collect();

        let orbs = level
            .orbs
            .iter()
            .map(|&(cx, cy)| EnergyOrb::from_center(cx, cy, &config.orb))
            .collect();

        let checkpoint = level
            .checkpoint
            .as_ref()
            .map(|cp| Checkpoint::new(cp.trigger, cp.respawn));

        tracing::debug!(
            platforms = level.platforms.len(),
            enemies = level.enemies.len(),
            orbs = level.orbs.len(),
            "Level loaded"
        );

        Self {
            platforms: level.platforms.iter().copied().map(Platform::from).collect(),
            finish: FinishZone {
                rect: level.finish_zone,
            },
            world: level.world_size,
            config,
            state: RunState {
                player,
                enemies,
                orbs,
                checkpoint,
                respawn_point: level.player_start,
                elapsed: 0.0,
                outcome: RunOutcome::InProgress,
            },
            paused: false,
        }
    }

    /// Respawn the player in place after a defeat, at the checkpoint if one
    /// was reached, otherwise at the level start. Returns `false` if the run
    /// was not lost.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state.outcome, RunOutcome::Defeated { .. }) {
            return false;
        }
        self.state.player.respawn(self.state.respawn_point);
        self.state.outcome = RunOutcome::InProgress;
        tracing::info!(respawn = ?self.state.respawn_point, "Run resumed");
        true
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn orbs(&self) -> &[EnergyOrb] {
        &self.state.orbs
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn finish_zone(&self) -> &FinishZone {
        &self.finish
    }

    pub fn world(&self) -> WorldSize {
        self.world
    }

    pub fn outcome(&self) -> RunOutcome {
        self.state.outcome
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    /// Contact checks, run after every entity has moved this tick.
    fn resolve_interactions(&mut self, events: &mut Vec<RunEvent>) -> Option<DeathCause> {
        let state = &mut self.state;

        if state.player.rect().top() > self.world.height {
            state.player.kill();
            return Some(DeathCause::FellOutOfBounds);
        }

        for enemy in &state.enemies {
            if !state.player.rect().intersects(enemy.rect()) {
                continue;
            }
            let before = state.player.health();
            let died = state.player.take_damage(self.config.contact_damage);
            if state.player.health() < before {
                events.push(RunEvent::PlayerHurt {
                    health: state.player.health(),
                });
            }
            if died {
                return Some(DeathCause::Defeated);
            }
        }

        for (index, orb) in state.orbs.iter_mut().enumerate() {
            if orb.is_active() && orb.rect().intersects(state.player.rect()) {
                orb.collect();
                state.player.add_double_jump_charge(1);
                events.push(RunEvent::OrbCollected { index });
            }
        }

        if let Some(cp) = state.checkpoint.as_mut()
            && cp.try_reach(state.player.rect())
        {
            state.respawn_point = cp.respawn_point();
            tracing::debug!(respawn = ?state.respawn_point, "Checkpoint reached");
            events.push(RunEvent::CheckpointReached {
                respawn: state.respawn_point,
            });
        }

        if self.finish.is_touched_by(state.player.rect()) {
            state.outcome = RunOutcome::Victory;
            events.push(RunEvent::Victory {
                elapsed: state.elapsed,
            });
            tracing::info!(elapsed = state.elapsed, "Level complete");
        }

        None
    }
}

impl Default for AdventureRun {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for AdventureRun {
    type Input = RunInput;
    type Event = RunEvent;

    fn metadata(&self) -> SimMetadata {
        SimMetadata {
            name: "Adventure".to_string(),
            description: "Run, jump, and fight your way to the finish".to_string(),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn update(&mut self, dt: f32, input: &RunInput) -> Vec<RunEvent> {
        if self.paused || self.state.is_over() {
            return Vec::new();
        }

        self.state.elapsed += dt;
        let mut events = Vec::new();

        if input.attack_pressed {
            let defeated = self.state.player.attack(&mut self.state.enemies);
            self.state
                .enemies
                .retain(|enemy| !defeated.contains(&enemy.id()));
            for id in defeated {
                tracing::debug!(?id, "Enemy defeated");
                events.push(RunEvent::EnemyDefeated { id });
            }
        }

        let held = HeldDirections {
            left: input.left,
            right: input.right,
        };
        self.state
            .player
            .update(held, input.jump_pressed, &self.platforms, dt);
        for enemy in &mut self.state.enemies {
            enemy.update(&self.platforms, dt);
        }
        for orb in &mut self.state.orbs {
            orb.update(dt);
        }
        let world_height = self.world.height;
        self.state.enemies.retain(|enemy| {
            let fell = enemy.rect().top() > world_height;
            if fell {
                tracing::debug!(id = ?enemy.id(), "Enemy fell out of the world");
            }
            !enemy.is_defeated() && !fell
        });

        if let Some(cause) = self.resolve_interactions(&mut events) {
            self.state.outcome = RunOutcome::Defeated { cause };
            events.push(RunEvent::PlayerDied { cause });
            tracing::info!(?cause, elapsed = self.state.elapsed, "Player died");
        }

        events
    }

    simulation_boilerplate!(state_type: RunState);
}
