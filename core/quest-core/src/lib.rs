//! # quest-core
//!
//! Core library for Eternal Quest, a goal tracker that awards points for
//! progress on simple, eternal, and checklist goals.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency.
//! - **Single owner**: [`QuestEngine`] owns the registry and score; nothing else mutates them.
//! - **All-or-nothing loads**: A failed load never leaves a half-replaced registry.
//! - **Flat text storage**: One header line for the score, one line per goal.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quest_core::{Goal, QuestEngine};
//!
//! let mut engine = QuestEngine::new();
//! engine.add_goal(Goal::simple("Read", "Read scriptures", 100));
//! let outcome = engine.record_event_on(0)?;
//! assert_eq!(outcome.new_score, 100);
//! ```

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod goal;
pub mod storage;

// Re-export commonly used items at crate root
pub use codec::{decode, encode, Decoded};
pub use config::{load_config_with_storage, save_config_with_storage, QuestConfig};
pub use engine::{GoalSummary, LoadState, QuestEngine, RecordOutcome};
pub use error::{QuestError, Result};
pub use goal::{Goal, GoalKind};
pub use storage::StorageConfig;
