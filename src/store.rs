//! Persisted key-value store for progression and settings.
//!
//! The store holds plain integers under string keys. Progression reads it
//! once at startup and writes back only when a level is completed.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Key holding the index of the level to play next.
pub const LEVEL_KEY: &str = "current_level_index";

/// Key holding the accumulated reward.
pub const REWARD_KEY: &str = "total_reward";

/// Key holding the sound preference (1 = on, 0 = off).
pub const SOUND_KEY: &str = "sound_on";

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Integer key-value persistence.
pub trait ProgressStore {
    /// Reads the value under `key`, if any.
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Writes `value` under `key`.
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;

    /// Reads the value under `key`, falling back to `default`.
    fn get_int_or(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }
}

/// Volatile store, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// On-disk shape of a save file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SaveFile {
    #[serde(default)]
    values: BTreeMap<String, i64>,
}

/// Store backed by a TOML file. Every write is flushed to disk.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
    save: SaveFile,
}

impl TomlFileStore {
    /// Opens the store at `path`. A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let save = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::new(format!("Failed to read save file: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| StoreError::new(format!("Failed to parse save file: {}", e)))?
        } else {
            debug!("Save file not found, starting empty");
            SaveFile::default()
        };

        info!(keys = save.values.len(), "Save file opened");
        Ok(Self { path, save })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self))]
    fn flush(&self) -> Result<(), StoreError> {
        let content = toml::to_string(&self.save)
            .map_err(|e| StoreError::new(format!("Failed to encode save file: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::new(format!("Failed to write save file: {}", e)))?;
        debug!(path = %self.path.display(), "Save file written");
        Ok(())
    }
}

impl ProgressStore for TomlFileStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.save.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.save.values.insert(key.to_string(), value);
        self.flush()
    }
}

/// True unless sound has been switched off. Defaults to on.
#[instrument(skip(store))]
pub fn sound_enabled(store: &impl ProgressStore) -> Result<bool, StoreError> {
    Ok(store.get_int_or(SOUND_KEY, 1)? != 0)
}

/// Flips the sound preference and returns the new setting.
#[instrument(skip(store))]
pub fn toggle_sound(store: &mut impl ProgressStore) -> Result<bool, StoreError> {
    let enabled = !sound_enabled(&*store)?;
    store.set_int(SOUND_KEY, i64::from(enabled))?;
    info!(enabled, "Sound preference changed");
    Ok(enabled)
}
