//! Persistence of the all-time records and player preferences.
//!
//! The simulation only talks to a [`RecordStore`]; [`TomlStore`] keeps the data in a small TOML
//! file, [`MemoryStore`] keeps it in memory (for tests and throwaway sessions).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{GameMode, InputMode};
use crate::error::StoreError;

/// Best results across all runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub best_wave: u32,
    pub high_score: u64,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            best_wave: 1,
            high_score: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub input_mode: InputMode,
    pub game_mode: GameMode,
}

/// Everything a store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub records: Records,
    pub preferences: Preferences,
}

pub trait RecordStore: Send {
    fn load(&self) -> Result<SaveData, StoreError>;
    fn save(&mut self, data: &SaveData) -> Result<(), StoreError>;

    /// Loads the saved data, falling back to the defaults (with a warning) if it can't be read.
    fn load_or_default(&self) -> SaveData {
        self.load().unwrap_or_else(|e| {
            warn!("Failed to load records, starting fresh: {e}");
            SaveData::default()
        })
    }
}

/// Stores records as TOML at a fixed path. A missing file reads as the defaults.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
}

impl TomlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for TomlStore {
    fn load(&self) -> Result<SaveData, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No record file yet");
            return Ok(SaveData::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn save(&mut self, data: &SaveData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(data)?;
        fs::write(&self.path, serialized)?;
        debug!(path = %self.path.display(), "Records saved");
        Ok(())
    }
}

/// An in-memory store. Clones share the same data, so a test can keep a handle and inspect what
/// the game saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<SaveData>>,
}

impl MemoryStore {
    pub fn with_data(data: SaveData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// The most recently saved data.
    pub fn snapshot(&self) -> SaveData {
        *self.data.lock()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<SaveData, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, data: &SaveData) -> Result<(), StoreError> {
        *self.data.lock() = *data;
        Ok(())
    }
}
