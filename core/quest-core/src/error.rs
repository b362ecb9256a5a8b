//! Error types for quest-core operations.
//!
//! Every variant is recoverable: callers report the message and carry on with the
//! engine's previous state intact.

use std::path::PathBuf;

/// All errors that can occur in quest-core operations.
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    // ─────────────────────────────────────────────────────────────────────
    // Engine Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Goal index {index} is out of range (registry has {len} goals)")]
    OutOfRange { index: usize, len: usize },

    // ─────────────────────────────────────────────────────────────────────
    // Codec Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Malformed score line: {value:?} is not an integer")]
    MalformedScore { value: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    // ─────────────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Storage unavailable: {context}: {source}")]
    ResourceUnavailable {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Configuration write failed: {path}: {details}")]
    ConfigWriteFailed { path: PathBuf, details: String },
}

/// Convenience type alias for Results using QuestError.
pub type Result<T> = std::result::Result<T, QuestError>;

impl QuestError {
    /// Wraps an I/O failure against persisted storage.
    pub(crate) fn unavailable(context: impl Into<String>, source: std::io::Error) -> Self {
        QuestError::ResourceUnavailable {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        QuestError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

// Conversion for string error compatibility
impl From<QuestError> for String {
    fn from(err: QuestError) -> String {
        err.to_string()
    }
}
