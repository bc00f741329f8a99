//! Runtime game configuration loaded from a TOML file.
//!
//! Every field has a compiled default (see [`crate::constants`]), so a config file only needs
//! the keys it wants to override. A missing file is not an error; a malformed one is logged and
//! ignored.

use std::fs;
use std::path::Path;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use clap::ValueEnum;
use strum_macros::IntoStaticStr;
use tracing::{debug, info, warn};

use crate::constants::{endless, waves, DEFAULT_VIEWPORT};
use crate::error::ConfigError;

/// How the run progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// Twenty discrete waves with a shop in between; the last wave is the boss.
    #[default]
    Waves,
    /// Continuous spawning keyed on active play time, with no end.
    Endless,
}

/// How the player steers and aims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputMode {
    /// Arrow keys move, and the ship turns (smoothly) to face the direction of travel.
    #[default]
    Keyboard,
    /// WASD moves, the ship faces the pointer.
    Mouse,
}

/// Game-wide settings, inserted into the world as a resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_mode: GameMode,
    pub input_mode: InputMode,
    /// Fire continuously without holding the trigger.
    pub auto_fire: bool,
    /// Offer the periodic ring blast ability in the shop.
    pub ring_blast: bool,
    /// Fixed RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Initial viewport size in pixels, `[width, height]`.
    pub viewport: [f32; 2],
    /// Regular enemies in wave 1.
    pub wave_enemy_count: u32,
    /// Extra enemies added per wave after the first.
    pub wave_enemy_growth: u32,
    /// Seconds of endless play between shop visits.
    pub endless_shop_interval: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_mode: GameMode::default(),
            input_mode: InputMode::default(),
            auto_fire: false,
            ring_blast: true,
            seed: None,
            viewport: DEFAULT_VIEWPORT.to_array(),
            wave_enemy_count: waves::ENEMY_COUNT,
            wave_enemy_growth: waves::ENEMY_GROWTH,
            endless_shop_interval: endless::SHOP_INTERVAL_SECONDS,
        }
    }
}

impl GameConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a config from TOML text. Missing keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads `path`, falling back to the defaults when it is absent or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No config file found; using compiled defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded game config");
                config
            }
            Err(e) => {
                warn!("{e}; using compiled defaults");
                Self::default()
            }
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::from_array(self.viewport)
    }

    /// Regular enemies scheduled for `wave` (before the milestone wave).
    pub fn wave_enemy_total(&self, wave: u32) -> u32 {
        let extra = wave.saturating_sub(1).saturating_mul(self.wave_enemy_growth);
        self.wave_enemy_count.saturating_add(extra).min(waves::ENEMY_COUNT_CAP)
    }
}
