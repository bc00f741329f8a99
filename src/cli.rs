//! Command line flags for the headless driver.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{GameConfig, GameMode, InputMode};
use crate::store::Preferences;

/// Headless Taser Arena. An autopilot plays while the renderer and HUD report through the log.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "taser-arena", version)]
pub struct Cli {
    /// Game config file
    #[arg(long, default_value = "taser-arena.toml")]
    pub config: PathBuf,

    /// Records file
    #[arg(long, default_value = "taser-arena-records.toml")]
    pub records: PathBuf,

    /// Stop after N frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Game mode, overriding the config and saved preference
    #[arg(long, value_enum)]
    pub mode: Option<GameMode>,

    /// Input mode, overriding the config and saved preference
    #[arg(long, value_enum)]
    pub input: Option<InputMode>,

    /// Fixed RNG seed, for reproducible runs
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Fire without holding the trigger
    #[arg(long)]
    pub auto_fire: bool,

    /// Pace frames at 60 Hz instead of running flat out
    #[arg(long)]
    pub realtime: bool,
}

impl Cli {
    /// Layers saved preferences (when a records file exists), then these flags, over `config`.
    pub fn apply(&self, config: &mut GameConfig, saved: Option<&Preferences>) {
        if let Some(preferences) = saved {
            config.game_mode = preferences.game_mode;
            config.input_mode = preferences.input_mode;
        }

        if let Some(mode) = self.mode {
            config.game_mode = mode;
        }
        if let Some(mode) = self.input {
            config.input_mode = mode;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.auto_fire |= self.auto_fire;
    }
}
