//! QuestEngine - the goal registry and running score.
//!
//! The engine exclusively owns the registry and score. Callers address goals by
//! 0-based position; the engine delegates recording to the goal's own award
//! rule and accumulates the result.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use quest_core::{Goal, QuestEngine};
//!
//! let mut engine = QuestEngine::new();
//! engine.add_goal(Goal::eternal("Scriptures", "Study daily", 100));
//! let outcome = engine.record_event_on(0)?;
//! engine.save(&path)?;
//! ```

use crate::codec::{self, Decoded};
use crate::error::{QuestError, Result};
use crate::goal::Goal;
use crate::storage;
use std::path::Path;

/// Progress of the most recent load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Result of recording an event on a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    pub points_earned: i64,
    pub new_score: i64,
}

/// Read-only listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSummary {
    /// 0-based registry position.
    pub position: usize,
    pub status: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct QuestEngine {
    goals: Vec<Goal>,
    score: i64,
    load_state: LoadState,
}

impl QuestEngine {
    /// An empty registry with a score of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a goal. Duplicate names are allowed.
    pub fn add_goal(&mut self, goal: Goal) {
        tracing::debug!(
            name = goal.name(),
            kind = goal.kind().tag(),
            position = self.goals.len(),
            "Goal added"
        );
        self.goals.push(goal);
    }

    /// Records one event on the goal at `index` and adds its award to the score.
    pub fn record_event_on(&mut self, index: usize) -> Result<RecordOutcome> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(index)
            .ok_or(QuestError::OutOfRange { index, len })?;

        let points_earned = goal.record_event();
        self.score = self.score.saturating_add(points_earned);

        tracing::info!(
            name = goal.name(),
            points = points_earned,
            score = self.score,
            "Event recorded"
        );

        Ok(RecordOutcome {
            points_earned,
            new_score: self.score,
        })
    }

    pub fn current_score(&self) -> i64 {
        self.score
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Snapshot of the registry for display, in registry order.
    pub fn list_goals(&self) -> Vec<GoalSummary> {
        self.goals
            .iter()
            .enumerate()
            .map(|(position, goal)| GoalSummary {
                position,
                status: goal.status(),
                name: goal.name().to_string(),
            })
            .collect()
    }

    /// Encodes the current state in the persisted text format.
    pub fn encode(&self) -> String {
        codec::encode(self.score, &self.goals)
    }

    /// Writes the current state to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        storage::atomic_write(path, &self.encode())?;
        tracing::info!(
            path = %path.display(),
            goals = self.goals.len(),
            score = self.score,
            "Goals saved"
        );
        Ok(())
    }

    /// Replaces the registry and score with the contents of `path`.
    ///
    /// Either everything in the file is loaded or nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.load_state = LoadState::Loading;
        let staged = storage::read_text(path).and_then(|text| codec::decode(&text));
        self.finish_load(&path.display().to_string(), staged)
    }

    /// Replaces the state from already-read text. Same all-or-nothing rule as [`load`].
    ///
    /// [`load`]: QuestEngine::load
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        self.load_state = LoadState::Loading;
        let staged = codec::decode(text);
        self.finish_load("<text>", staged)
    }

    /// Commits a staged decode, or records the failure with state untouched.
    fn finish_load(&mut self, source: &str, staged: Result<Decoded>) -> Result<()> {
        match staged {
            Ok(decoded) => {
                self.goals = decoded.goals;
                self.score = decoded.score;
                self.load_state = LoadState::Loaded;
                tracing::info!(
                    source,
                    goals = self.goals.len(),
                    score = self.score,
                    "Goals loaded"
                );
                Ok(())
            }
            Err(err) => {
                self.load_state = LoadState::Failed;
                tracing::warn!(source, error = %err, "Load failed, state kept");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use tempfile::TempDir;

    fn engine_with_goals() -> QuestEngine {
        let mut engine = QuestEngine::new();
        engine.add_goal(Goal::simple("Read", "Read scriptures", 100));
        engine.add_goal(Goal::eternal("Walk", "Evening walk", 10));
        engine
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = QuestEngine::new();
        assert_eq!(engine.current_score(), 0);
        assert!(engine.list_goals().is_empty());
        assert_eq!(engine.load_state(), LoadState::NotLoaded);
    }

    #[test]
    fn test_record_accumulates_score() {
        let mut engine = engine_with_goals();

        let first = engine.record_event_on(1).unwrap();
        assert_eq!(first, RecordOutcome { points_earned: 10, new_score: 10 });

        let second = engine.record_event_on(0).unwrap();
        assert_eq!(second.points_earned, 100);
        assert_eq!(second.new_score, 110);

        let third = engine.record_event_on(0).unwrap();
        assert_eq!(third.points_earned, 0);
        assert_eq!(engine.current_score(), 110);
    }

    #[test]
    fn test_record_out_of_range_leaves_state() {
        let mut engine = engine_with_goals();
        engine.record_event_on(1).unwrap();

        let err = engine.record_event_on(2).unwrap_err();
        assert!(matches!(err, QuestError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(engine.current_score(), 10);

        assert!(engine.record_event_on(usize::MAX).is_err());
        assert_eq!(engine.current_score(), 10);
    }

    #[test]
    fn test_duplicate_names_kept_in_order() {
        let mut engine = QuestEngine::new();
        engine.add_goal(Goal::eternal("Same", "one", 1));
        engine.add_goal(Goal::eternal("Same", "two", 2));

        let listed = engine.list_goals();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].position, 0);
        assert_eq!(listed[1].position, 1);
        assert_eq!(engine.goals()[1].description(), "two");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("goals.txt");

        let mut engine = engine_with_goals();
        engine.add_goal(Goal::checklist(
            "Pray",
            "Daily prayer",
            50,
            NonZeroU32::new(3).unwrap(),
            250,
        ));
        engine.record_event_on(0).unwrap();
        engine.record_event_on(2).unwrap();
        engine.save(&path).unwrap();

        let mut restored = QuestEngine::new();
        restored.load(&path).unwrap();

        assert_eq!(restored.load_state(), LoadState::Loaded);
        assert_eq!(restored.current_score(), 150);
        assert_eq!(restored.goals(), engine.goals());
    }

    #[test]
    fn test_load_replaces_existing_state() {
        let mut engine = engine_with_goals();
        engine.record_event_on(0).unwrap();

        engine.load_from_str("42\nEternal|Other|x|5\n").unwrap();

        assert_eq!(engine.current_score(), 42);
        assert_eq!(engine.goals(), &[Goal::eternal("Other", "x", 5)]);
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut engine = engine_with_goals();
        engine.record_event_on(0).unwrap();
        let before = engine.goals().to_vec();

        let err = engine
            .load_from_str("900\nEternal|New|x|5\nBogus|x|y\n")
            .unwrap_err();

        assert!(matches!(err, QuestError::MalformedRecord { line: 3, .. }));
        assert_eq!(engine.load_state(), LoadState::Failed);
        assert_eq!(engine.current_score(), 100);
        assert_eq!(engine.goals(), before.as_slice());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_load_outcomes_logged_for_text_and_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("goals.txt");
        engine_with_goals().save(&path).unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut engine = QuestEngine::new();
            engine.load_from_str("3\nEternal|a|b|1\n").unwrap();
            engine.load_from_str("3\nBogus|x|y\n").unwrap_err();
            engine.load(&path).unwrap();
            engine.load(&temp.path().join("missing.txt")).unwrap_err();
        });

        let text = logs.text();
        assert_eq!(text.matches("Goals loaded").count(), 2);
        assert_eq!(text.matches("Load failed, state kept").count(), 2);
        assert!(text.contains("<text>"));
        assert!(text.contains("goals.txt"));
    }

    #[test]
    fn test_missing_file_is_unavailable_and_keeps_state() {
        let temp = TempDir::new().unwrap();
        let mut engine = engine_with_goals();

        let err = engine.load(&temp.path().join("missing.txt")).unwrap_err();

        assert!(matches!(err, QuestError::ResourceUnavailable { .. }));
        assert_eq!(engine.load_state(), LoadState::Failed);
        assert_eq!(engine.goals().len(), 2);
    }

    #[test]
    fn test_save_to_unwritable_location_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let engine = engine_with_goals();
        let err = engine.save(&blocker.join("goals.txt")).unwrap_err();
        assert!(matches!(err, QuestError::ResourceUnavailable { .. }));
    }
}
