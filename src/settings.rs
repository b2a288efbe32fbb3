//! Session configuration
//!
//! Every tunable the simulation reads is fixed at session start. Values can be
//! loaded from a JSON file; anything missing falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_SUBSTEPS, TICK_RATE};
use crate::sim::{EntityKind, Rect};

/// Errors from loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Sprite metadata the simulation needs: hit-box size and animation layout.
/// Image data stays with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSpec {
    pub width: i32,
    pub height: i32,
    /// Number of animation frames
    pub frames: u32,
    /// Ticks each animation frame is shown
    pub animcycle: u32,
}

impl SpriteSpec {
    pub const fn new(width: i32, height: i32, frames: u32, animcycle: u32) -> Self {
        Self {
            width,
            height,
            frames,
            animcycle,
        }
    }
}

/// Per-kind sprite table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub player: SpriteSpec,
    pub alien: SpriteSpec,
    pub bomb: SpriteSpec,
    pub shot: SpriteSpec,
    pub rocket: SpriteSpec,
    pub laser: SpriteSpec,
    pub gift: SpriteSpec,
    pub explosion: SpriteSpec,
}

impl Default for Sprites {
    fn default() -> Self {
        Self {
            player: SpriteSpec::new(66, 42, 2, 1),
            alien: SpriteSpec::new(64, 28, 3, 12),
            bomb: SpriteSpec::new(10, 18, 1, 1),
            shot: SpriteSpec::new(4, 16, 1, 1),
            rocket: SpriteSpec::new(24, 32, 1, 1),
            laser: SpriteSpec::new(8, 600, 1, 1),
            gift: SpriteSpec::new(32, 32, 3, 12),
            explosion: SpriteSpec::new(66, 66, 2, 3),
        }
    }
}

impl Sprites {
    /// Sprite for a kind. Blasts are sized by the config, not by a sprite.
    pub fn for_kind(&self, kind: EntityKind) -> Option<&SpriteSpec> {
        match kind {
            EntityKind::Player => Some(&self.player),
            EntityKind::Alien => Some(&self.alien),
            EntityKind::Bomb => Some(&self.bomb),
            EntityKind::Shot => Some(&self.shot),
            EntityKind::Rocket => Some(&self.rocket),
            EntityKind::Laser => Some(&self.laser),
            EntityKind::Gift => Some(&self.gift),
            EntityKind::Explosion => Some(&self.explosion),
            EntityKind::Blast => None,
        }
    }
}

/// Everything a session needs to know up front
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: i32,
    pub field_height: i32,
    /// Lowest `right` edge a freshly spawned alien or gift may get
    pub spawn_min_right: i32,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Maximum ticks run for one clock advance
    pub max_substeps: u32,

    // === Spawning ===
    /// Player bullets allowed on screen at once
    pub max_shots: usize,
    /// An alien appears with probability 1/alien_odds once reloaded
    pub alien_odds: u32,
    /// The most recent alien drops a bomb with probability 1/bomb_odds per tick
    pub bomb_odds: u32,
    /// Ticks between new aliens
    pub alien_reload: u32,
    /// Probability a gift appears per tick once reloaded
    pub gift_odds: f64,
    /// Ticks between new gifts
    pub gift_reload: u32,
    /// Create one alien together with the player
    pub spawn_initial_alien: bool,

    // === Motion ===
    pub player_speed: i32,
    /// Horizontal pixels per one-pixel vertical bob of the player ship
    pub player_bounce: i32,
    /// Gun offset from the ship's centre, mirrored by facing
    pub gun_offset: i32,
    pub shot_speed: i32,
    /// Negative = upward
    pub rocket_speed: i32,
    pub bomb_speed: i32,
    pub alien_y_speed: i32,
    pub gift_y_speed: i32,
    /// Ticks between alien x-velocity re-rolls (gifts stop drifting after one)
    pub drift_period: u32,

    // === Weapons & effects ===
    /// Ticks a laser stays active
    pub laser_duration: u32,
    pub blast_width: i32,
    pub blast_height: i32,
    /// Ticks an explosion is shown
    pub explosion_life: u32,

    // === Scoring ===
    pub alien_points: u64,
    pub gift_points: u64,

    pub sprites: Sprites,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 675,
            field_height: 1000,
            spawn_min_right: 111,

            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,

            max_shots: 10,
            alien_odds: 5,
            bomb_odds: 60,
            alien_reload: 100,
            gift_odds: 0.01,
            gift_reload: 200,
            spawn_initial_alien: true,

            player_speed: 10,
            player_bounce: 24,
            gun_offset: -11,
            shot_speed: 11,
            rocket_speed: -11,
            bomb_speed: 4,
            alien_y_speed: 1,
            gift_y_speed: 2,
            drift_period: 70,

            laser_duration: 40,
            blast_width: 400,
            blast_height: 400,
            explosion_life: 12,

            alien_points: 1,
            gift_points: 10,

            sprites: Sprites::default(),
        }
    }
}

impl GameConfig {
    /// The play field rectangle
    pub fn field(&self) -> Rect {
        Rect::new(0, 0, self.field_width, self.field_height)
    }

    /// Fixed simulation timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Parse a config from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "field must be non-empty, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if self.alien_odds == 0 || self.bomb_odds == 0 {
            return Err(ConfigError::Invalid(
                "alien_odds and bomb_odds must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gift_odds) {
            return Err(ConfigError::Invalid(format!(
                "gift_odds must be a probability, got {}",
                self.gift_odds
            )));
        }
        if self.drift_period == 0 {
            return Err(ConfigError::Invalid("drift_period must be positive".into()));
        }
        if self.blast_width <= 0 || self.blast_height <= 0 {
            return Err(ConfigError::Invalid("blast must be non-empty".into()));
        }
        for kind in EntityKind::UPDATE_ORDER {
            let Some(spec) = self.sprites.for_kind(kind) else {
                continue;
            };
            if spec.width <= 0 || spec.height <= 0 || spec.frames == 0 || spec.animcycle == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{kind:?} sprite needs positive size, frames and animcycle"
                )));
            }
        }
        Ok(())
    }
}
