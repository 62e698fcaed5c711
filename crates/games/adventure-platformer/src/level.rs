use std::path::Path;

use serde::{Deserialize, Serialize};

use adventure_core::Rect;

/// World pixel dimensions. Anything whose top edge passes below `height`
/// has fallen out of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: i32,
    pub height: i32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
        }
    }
}

/// Enemy placement. Missing `speed`/`health` fall back to the enemy tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: i32,
    pub y: i32,
    pub min_x: i32,
    pub max_x: i32,
    pub speed: Option<f32>,
    pub health: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSpec {
    pub trigger: Rect,
    /// Top-left player position used after touching the trigger.
    pub respawn: (i32, i32),
}

/// Hand-authored level description, independent of any file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub player_start: (i32, i32),
    #[serde(default)]
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    pub finish_zone: Rect,
    #[serde(default)]
    pub checkpoint: Option<CheckpointSpec>,
    /// Energy orb center points.
    #[serde(default)]
    pub orbs: Vec<(i32, i32)>,
    #[serde(default)]
    pub world_size: WorldSize,
}

/// Errors produced while loading or validating level data.
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read level: {e}"),
            Self::Parse(e) => write!(f, "failed to parse level: {e}"),
            Self::Invalid(m) => write!(f, "invalid level: {m}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for LevelError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl LevelData {
    /// Read, parse, and validate a TOML level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML level description.
    pub fn from_toml_str(content: &str) -> Result<Self, LevelError> {
        let level: LevelData = toml::from_str(content)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        let world = self.world_size;
        if world.width <= 0 || world.height <= 0 {
            return Err(LevelError::Invalid(format!(
                "world size must be positive, got {}x{}",
                world.width, world.height
            )));
        }

        for (i, platform) in self.platforms.iter().enumerate() {
            check_size(platform, &format!("platform {i}"))?;
        }
        check_size(&self.finish_zone, "finish zone")?;
        if let Some(cp) = &self.checkpoint {
            check_size(&cp.trigger, "checkpoint trigger")?;
        }

        for (i, enemy) in self.enemies.iter().enumerate() {
            if enemy.min_x >= enemy.max_x {
                return Err(LevelError::Invalid(format!(
                    "enemy {i} patrol range is empty: min_x={} max_x={}",
                    enemy.min_x, enemy.max_x
                )));
            }
            if enemy.speed.is_some_and(|s| !s.is_finite() || s < 0.0) {
                return Err(LevelError::Invalid(format!(
                    "enemy {i} speed must be a non-negative number"
                )));
            }
        }

        let (sx, sy) = self.player_start;
        if sx < 0 || sx >= world.width || sy < 0 || sy >= world.height {
            return Err(LevelError::Invalid(format!(
                "player start ({sx}, {sy}) lies outside the {}x{} world",
                world.width, world.height
            )));
        }

        Ok(())
    }
}

fn check_size(rect: &Rect, what: &str) -> Result<(), LevelError> {
    if rect.width < 0 || rect.height < 0 {
        return Err(LevelError::Invalid(format!(
            "{what} has negative size {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

/// World width of the first level.
const LEVEL_ONE_WIDTH: i32 = 1400;
/// World height of the first level.
const LEVEL_ONE_HEIGHT: i32 = 640;
const GROUND_HEIGHT: i32 = 100;

/// The built-in first level: a ground path with pits, ramps over the first
/// gap, an optional floating route, and a walled finish alcove.
pub fn level_one() -> LevelData {
    let ground_y = LEVEL_ONE_HEIGHT - GROUND_HEIGHT;

    let mut platforms = Vec::new();

    // Ground path with gentle gaps
    platforms.extend([
        Rect::new(0, ground_y, 360, GROUND_HEIGHT),
        Rect::new(380, ground_y, 300, GROUND_HEIGHT),
        Rect::new(720, ground_y, 260, GROUND_HEIGHT),
        Rect::new(1020, ground_y, 200, GROUND_HEIGHT),
        Rect::new(1240, ground_y, 160, GROUND_HEIGHT),
    ]);

    // Ramps across the first pit
    platforms.extend([
        Rect::new(320, ground_y - 60, 120, 20),
        Rect::new(460, ground_y - 100, 120, 20),
    ]);

    // Floating upper route
    platforms.extend([
        Rect::new(600, ground_y - 120, 140, 20),
        Rect::new(760, ground_y - 160, 140, 20),
        Rect::new(920, ground_y - 140, 140, 20),
        Rect::new(1080, ground_y - 180, 120, 20),
        Rect::new(1180, ground_y - 120, 120, 20),
    ]);

    // Finish alcove
    platforms.extend([
        Rect::new(1180, ground_y - 140, 20, 140),
        Rect::new(1360, ground_y - 140, 20, 140),
        Rect::new(1180, ground_y - 140, 200, 20),
        Rect::new(1200, ground_y - 80, 160, 20),
    ]);

    let enemy = |x, y, min_x, max_x| EnemySpawn {
        x,
        y,
        min_x,
        max_x,
        speed: None,
        health: Some(3),
    };
    let enemies = vec![
        enemy(200, ground_y - 50, 120, 320),
        enemy(640, ground_y - 170, 600, 760),
        enemy(860, ground_y - 50, 780, 940),
        enemy(1150, ground_y - 50, 1080, 1220),
    ];

    LevelData {
        player_start: (50, ground_y - 60),
        platforms,
        enemies,
        finish_zone: Rect::new(1220, ground_y - 160, 120, 120),
        checkpoint: Some(CheckpointSpec {
            trigger: Rect::new(740, ground_y - 80, 30, 80),
            respawn: (740, ground_y - 60),
        }),
        orbs: vec![
            (520, ground_y - 140),
            (830, ground_y - 200),
            (1140, ground_y - 220),
        ],
        world_size: WorldSize {
            width: LEVEL_ONE_WIDTH,
            height: LEVEL_ONE_HEIGHT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        player_start = [50, 100]
        finish_zone = { x = 800, y = 100, width = 50, height = 50 }

        [[platforms]]
        x = 0
        y = 200
        width = 900
        height = 40

        [[enemies]]
        x = 300
        y = 150
        min_x = 250
        max_x = 450
    "#;

    #[test]
    fn level_one_is_valid() {
        level_one().validate().unwrap();
    }

    #[test]
    fn level_one_layout() {
        let level = level_one();
        assert_eq!(level.platforms.len(), 16);
        assert_eq!(level.enemies.len(), 4);
        assert_eq!(level.finish_zone, Rect::new(1220, 380, 120, 120));
        assert_eq!(level.player_start, (50, 480));
        assert_eq!(level.world_size.width, 1400);
    }

    #[test]
    fn level_one_start_rests_on_ground() {
        let level = level_one();
        let (x, y) = level.player_start;
        let feet = Rect::new(x, y + 60, 40, 1);
        assert!(
            level.platforms.iter().any(|p| p.intersects(&feet)),
            "Player should spawn standing on a platform"
        );
    }

    #[test]
    fn minimal_toml_parses_with_defaults() {
        let level = LevelData::from_toml_str(MINIMAL).unwrap();
        assert_eq!(level.platforms, vec![Rect::new(0, 200, 900, 40)]);
        assert_eq!(level.enemies[0].speed, None);
        assert_eq!(level.enemies[0].health, None);
        assert!(level.checkpoint.is_none());
        assert!(level.orbs.is_empty());
        assert_eq!(level.world_size, WorldSize::default());
    }

    #[test]
    fn toml_with_checkpoint_and_orbs() {
        let level = LevelData::from_toml_str(
            r#"
            player_start = [50, 100]
            finish_zone = { x = 800, y = 100, width = 50, height = 50 }
            orbs = [[100, 120], [400, 90]]

            [checkpoint]
            trigger = { x = 500, y = 120, width = 20, height = 80 }
            respawn = [500, 140]
            "#,
        )
        .unwrap();
        assert_eq!(level.orbs, vec![(100, 120), (400, 90)]);
        let cp = level.checkpoint.unwrap();
        assert_eq!(cp.trigger, Rect::new(500, 120, 20, 80));
        assert_eq!(cp.respawn, (500, 140));
    }

    #[test]
    fn inverted_patrol_range_is_rejected() {
        let mut level = level_one();
        level.enemies[0].min_x = 400;
        level.enemies[0].max_x = 100;
        let err = level.validate().unwrap_err();
        assert!(matches!(err, LevelError::Invalid(_)));
        assert!(err.to_string().contains("enemy 0"));
    }

    #[test]
    fn negative_platform_size_is_rejected() {
        let mut level = level_one();
        level.platforms[3].width = -5;
        assert!(matches!(level.validate(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn start_outside_world_is_rejected() {
        let mut level = level_one();
        level.player_start = (5000, 10);
        assert!(matches!(level.validate(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn non_positive_world_is_rejected() {
        let mut level = level_one();
        level.world_size.height = 0;
        assert!(matches!(level.validate(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LevelData::from_toml_str("player_start = \"left\"").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LevelData::load("/nonexistent/adventure/level.toml").unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
