//! Centralized error types for the arena simulation.
//!
//! Nothing in the simulation is allowed to take the game down: systems report problems by
//! writing [`GameError`] events, which the game drains and logs once per tick.

use std::io;
use std::path::PathBuf;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while reading the TOML game configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Errors raised by record stores.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt record file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize records: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors reported by renderers and HUD sinks.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Frame could not be presented: {0}")]
    PresentFailed(String),

    #[error("Missing resource: {0}")]
    MissingResource(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
