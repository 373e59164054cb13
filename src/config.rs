//! Game configuration.

use crate::games::linepaint::VerticalAxis;
use crate::progression::LEVEL_REWARD;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Level pack file (`.toml` or `.json`).
    #[serde(default = "default_levels_path")]
    levels_path: PathBuf,

    /// Save file for progression and settings.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Reward banked per completed level.
    #[serde(default = "default_reward")]
    reward_per_level: u32,

    /// World size of one grid cell.
    #[serde(default = "default_cell_size")]
    cell_size: f32,

    /// Which way `y` grows on screen.
    #[serde(default)]
    vertical_axis: VerticalAxis,
}

#[instrument]
fn default_levels_path() -> PathBuf {
    PathBuf::from("levels.toml")
}

#[instrument]
fn default_save_path() -> PathBuf {
    PathBuf::from("linepaint_save.toml")
}

#[instrument]
fn default_reward() -> u32 {
    LEVEL_REWARD
}

#[instrument]
fn default_cell_size() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels_path: default_levels_path(),
            save_path: default_save_path(),
            reward_per_level: default_reward(),
            cell_size: default_cell_size(),
            vertical_axis: VerticalAxis::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if !(config.cell_size.is_finite() && config.cell_size > 0.0) {
            return Err(ConfigError::new(format!(
                "cell_size must be positive, got {}",
                config.cell_size
            )));
        }

        info!(levels = %config.levels_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the level pack path.
    pub fn with_levels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.levels_path = path.into();
        self
    }

    /// Replaces the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Replaces the per-level reward.
    pub fn with_reward_per_level(mut self, reward: u32) -> Self {
        self.reward_per_level = reward;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
