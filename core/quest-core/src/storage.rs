//! Storage configuration and path management for Eternal Quest.
//!
//! All persisted files live under a single root (default `~/.eternal-quest`).
//! Tests inject a temp directory with [`StorageConfig::with_root`].

use crate::error::{QuestError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable that overrides the default storage root.
pub const QUEST_HOME_ENV: &str = "QUEST_HOME";

const DEFAULT_ROOT_DIR: &str = ".eternal-quest";

/// Central configuration for all Eternal Quest storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Resolves the root from `QUEST_HOME`, falling back to `~/.eternal-quest`.
    ///
    /// Returns `None` only when neither is available.
    pub fn from_env() -> Option<Self> {
        if let Some(root) = std::env::var_os(QUEST_HOME_ENV).filter(|v| !v.is_empty()) {
            return Some(Self::with_root(PathBuf::from(root)));
        }
        dirs::home_dir().map(|home| Self::with_root(home.join(DEFAULT_ROOT_DIR)))
    }

    /// Creates a StorageConfig with a custom root directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to config.json (app preferences).
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Path to a goals file by name, relative to the root.
    pub fn goals_file(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Path to the logs/ directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Creates the root directory if it doesn't exist.
    pub fn ensure_root(&self) -> Result<()> {
        fs_err::create_dir_all(&self.root)
            .map_err(|e| QuestError::unavailable("creating storage root", e))
    }
}

/// Reads a whole text file. The handle is closed before returning.
pub fn read_text(path: &Path) -> Result<String> {
    fs_err::read_to_string(path).map_err(|e| QuestError::unavailable("reading", e))
}

/// Writes content to a file atomically using temp file + rename.
///
/// A failed write leaves any existing file at `path` untouched.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs_err::create_dir_all(dir)
        .map_err(|e| QuestError::unavailable("creating parent directory", e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        QuestError::unavailable(format!("creating temp file in {}", dir.display()), e)
    })?;

    tmp.write_all(contents.as_bytes()).map_err(|e| {
        QuestError::unavailable(format!("writing temp file for {}", path.display()), e)
    })?;

    tmp.flush().map_err(|e| {
        QuestError::unavailable(format!("flushing temp file for {}", path.display()), e)
    })?;

    tmp.persist(path).map_err(|e| {
        QuestError::unavailable(format!("persisting temp file to {}", path.display()), e.error)
    })?;

    Ok(())
}
