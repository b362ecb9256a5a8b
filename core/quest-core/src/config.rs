//! Configuration loading and saving.
//!
//! Preferences live in `<root>/config.json`. A missing file means defaults;
//! a file that exists but doesn't parse is an error rather than silently reset.

use crate::error::{QuestError, Result};
use crate::storage::{atomic_write, StorageConfig};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOALS_FILE: &str = "goals.txt";

/// User preferences for the quest tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    /// File name of the working goals file, relative to the storage root.
    pub goals_file: String,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            goals_file: DEFAULT_GOALS_FILE.to_string(),
        }
    }
}

/// Loads the configuration, returning defaults if the file doesn't exist.
pub fn load_config_with_storage(storage: &StorageConfig) -> Result<QuestConfig> {
    let path = storage.config_file();
    let content = match fs_err::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(QuestConfig::default());
        }
        Err(e) => return Err(QuestError::unavailable("reading config", e)),
    };

    serde_json::from_str(&content).map_err(|e| QuestError::ConfigMalformed {
        path,
        details: e.to_string(),
    })
}

/// Saves the configuration to disk.
pub fn save_config_with_storage(storage: &StorageConfig, config: &QuestConfig) -> Result<()> {
    let path = storage.config_file();
    let content =
        serde_json::to_string_pretty(config).map_err(|e| QuestError::ConfigWriteFailed {
            path: path.clone(),
            details: e.to_string(),
        })?;
    atomic_write(&path, &content)
}
