use serde::{Deserialize, Serialize};

use crate::physics::GRAVITY;

/// Env var naming the TOML config file.
pub const CONFIG_ENV_VAR: &str = "ADVENTURE_CONFIG";
/// Config path used when the env var is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/adventure.toml";

/// World physics parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: GRAVITY }
    }
}

/// Player movement, combat, and jump-assist tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: i32,
    pub height: i32,
    /// Horizontal run speed (px/s).
    pub speed: f32,
    /// Vertical jump impulse (px/s). Negative is upward.
    pub jump_strength: f32,
    pub max_health: u32,
    pub invulnerability_time: f32,
    pub attack_cooldown: f32,
    /// How long `is_attacking` stays true after a swing.
    pub attack_indicator_duration: f32,
    /// Symmetric (width, height) growth of the player rect for the hitbox.
    pub attack_inflate: (i32, i32),
    /// Extra hitbox width added on the facing side.
    pub attack_reach: i32,
    pub jump_buffer_window: f32,
    pub coyote_time: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40,
            height: 60,
            speed: 220.0,
            jump_strength: -500.0,
            max_health: 3,
            invulnerability_time: 0.8,
            attack_cooldown: 0.4,
            attack_indicator_duration: 0.18,
            attack_inflate: (50, 24),
            attack_reach: 80,
            jump_buffer_window: 0.15,
            coyote_time: 0.12,
        }
    }
}

/// Defaults applied to enemy spawns that omit fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: i32,
    pub height: i32,
    pub speed: f32,
    pub health: i32,
    /// Spawned health is raised to at least this value.
    pub min_health: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 40,
            height: 50,
            speed: 120.0,
            health: 3,
            min_health: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    pub diameter: i32,
    pub respawn_delay: f32,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            diameter: 28,
            respawn_delay: 5.0,
        }
    }
}

/// Top-level platformer configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub orb: OrbTuning,
    /// Health lost by the player on enemy contact.
    pub contact_damage: u32,
    pub tick_rate_hz: f32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            orb: OrbTuning::default(),
            contact_damage: 1,
            tick_rate_hz: 60.0,
        }
    }
}

impl PlatformerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    PlatformerConfig::default()
                },
            },
            Err(_) => PlatformerConfig::default(),
        }
    }

    /// Parse a TOML config. An out-of-range `tick_rate_hz` is replaced by
    /// the default rather than rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: Self = toml::from_str(content)?;
        let hz = sanitize_tick_rate(cfg.tick_rate_hz);
        if hz != cfg.tick_rate_hz {
            tracing::warn!(requested = cfg.tick_rate_hz, using = hz, "Invalid tick_rate_hz");
            cfg.tick_rate_hz = hz;
        }
        Ok(cfg)
    }
}

/// Highest tick rate a host will be driven at.
pub const MAX_TICK_RATE_HZ: f32 = 1000.0;

/// Map a requested tick rate into `[1, MAX_TICK_RATE_HZ]`. Non-finite or
/// non-positive rates fall back to 60 Hz.
pub fn sanitize_tick_rate(hz: f32) -> f32 {
    if !hz.is_finite() || hz <= 0.0 {
        return 60.0;
    }
    hz.clamp(1.0, MAX_TICK_RATE_HZ)
}
