use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use adventure_core::sim_trait::Simulation;
use adventure_platformer::camera::Camera;
use adventure_platformer::config::{PlatformerConfig, sanitize_tick_rate};
use adventure_platformer::level::{LevelData, level_one};
use adventure_platformer::{AdventureRun, RunEvent, RunInput, RunOutcome};

/// Give up on a run after this much simulated time.
const MAX_RUN_SECONDS: f32 = 120.0;
/// Respawns allowed before the run counts as lost.
const MAX_RETRIES: u32 = 5;
const VIEWPORT: (i32, i32) = (960, 640);

/// Scripted input: run right, hop on a fixed cadence, swing whenever an
/// enemy is close ahead.
struct Autopilot {
    tick: u64,
}

impl Autopilot {
    const JUMP_EVERY: u64 = 45;

    fn next_input(&mut self, run: &AdventureRun) -> RunInput {
        self.tick += 1;
        let player = run.player().rect();
        let enemy_ahead = run.enemies().iter().any(|enemy| {
            let dx = enemy.rect().left() - player.right();
            (0..=80).contains(&dx) && (enemy.rect().center().1 - player.center().1).abs() < 60
        });
        RunInput {
            left: false,
            right: true,
            jump_pressed: self.tick % Self::JUMP_EVERY == 0,
            attack_pressed: enemy_ahead,
        }
    }
}

struct Options {
    level_path: Option<String>,
    realtime: bool,
}

fn parse_args() -> Options {
    let mut options = Options {
        level_path: None,
        realtime: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => options.realtime = true,
            _ => options.level_path = Some(arg),
        }
    }
    options
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = parse_args();
    let config = PlatformerConfig::load();

    let level = match &options.level_path {
        Some(path) => match LevelData::load(path) {
            Ok(level) => {
                tracing::info!(path = %path, "Loaded level");
                level
            },
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Failed to load level");
                return ExitCode::FAILURE;
            },
        },
        None => level_one(),
    };

    let mut run = match AdventureRun::load(&level, config) {
        Ok(run) => run,
        Err(e) => {
            tracing::error!(error = %e, "Level rejected");
            return ExitCode::FAILURE;
        },
    };

    let meta = run.metadata();
    tracing::info!(name = %meta.name, realtime = options.realtime, "Adventure headless starting");

    let tick_rate = sanitize_tick_rate(run.tick_rate());
    let dt = 1.0 / tick_rate;
    let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut autopilot = Autopilot { tick: 0 };
    let mut camera = Camera::new(VIEWPORT.0, VIEWPORT.1);
    let mut retries = 0;
    let mut simulated = 0.0_f32;

    while simulated < MAX_RUN_SECONDS {
        if options.realtime {
            interval.tick().await;
        }

        let input = autopilot.next_input(&run);
        for event in run.update(dt, &input) {
            log_event(&event);
        }
        simulated += dt;

        camera.follow(run.player().rect(), run.world());
        if autopilot.tick % tick_rate as u64 == 0 {
            tracing::debug!(
                player = ?run.player().rect().top_left(),
                camera = ?camera.offset,
                "Progress"
            );
        }

        match run.outcome() {
            RunOutcome::InProgress => {},
            RunOutcome::Victory => break,
            RunOutcome::Defeated { .. } => {
                if retries >= MAX_RETRIES {
                    break;
                }
                retries += 1;
                run.retry();
            },
        }
    }

    match run.outcome() {
        RunOutcome::Victory => {
            tracing::info!(elapsed = run.state().elapsed, retries, "Level cleared");
            ExitCode::SUCCESS
        },
        RunOutcome::Defeated { cause } => {
            tracing::warn!(?cause, retries, "Out of retries");
            ExitCode::FAILURE
        },
        RunOutcome::InProgress => {
            tracing::warn!(seconds = MAX_RUN_SECONDS, "Run timed out");
            ExitCode::FAILURE
        },
    }
}

fn log_event(event: &RunEvent) {
    match event {
        RunEvent::PlayerHurt { health } => tracing::info!(health, "Player hurt"),
        RunEvent::OrbCollected { index } => tracing::info!(index, "Orb collected"),
        RunEvent::EnemyDefeated { id } => tracing::info!(id = id.0, "Enemy defeated"),
        other => tracing::debug!(event = ?other, "Run event"),
    }
}
