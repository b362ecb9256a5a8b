//! Goal variants and their award rules.
//!
//! A [`Goal`] carries the fields every variant shares (name, description, base
//! points) and a [`GoalKind`] holding the variant-specific state. The set of
//! variants is closed; the codec matches on it exhaustively.
//!
//! | Variant   | Award on record                                              |
//! |-----------|--------------------------------------------------------------|
//! | Simple    | base points once, then nothing                               |
//! | Eternal   | base points every time                                       |
//! | Checklist | base points until the target, base + bonus on the target hit |

use std::fmt;
use std::num::NonZeroU32;

/// Persisted tag for each variant. Also the first field of an encoded record.
pub const SIMPLE_TAG: &str = "Simple";
pub const ETERNAL_TAG: &str = "Eternal";
pub const CHECKLIST_TAG: &str = "Checklist";

/// Variant-specific state for a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalKind {
    /// One-shot goal. `completed` flips to true on the first recording.
    Simple { completed: bool },

    /// Never completes; every recording pays out.
    Eternal,

    /// Repeated goal with a bonus when `times_completed` reaches `target_count`.
    ///
    /// The counter keeps increasing past the target but no longer awards points.
    Checklist {
        times_completed: u32,
        target_count: NonZeroU32,
        bonus_points: i64,
    },
}

impl GoalKind {
    /// The tag used in the persisted format.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple { .. } => SIMPLE_TAG,
            GoalKind::Eternal => ETERNAL_TAG,
            GoalKind::Checklist { .. } => CHECKLIST_TAG,
        }
    }
}

/// A tracked goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    description: String,
    base_points: i64,
    kind: GoalKind,
}

impl Goal {
    /// Builds a goal from its parts. Used by the codec when restoring state.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_points: i64,
        kind: GoalKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base_points,
            kind,
        }
    }

    /// A fresh, not yet completed simple goal.
    pub fn simple(name: impl Into<String>, description: impl Into<String>, points: i64) -> Self {
        Self::new(name, description, points, GoalKind::Simple { completed: false })
    }

    pub fn eternal(name: impl Into<String>, description: impl Into<String>, points: i64) -> Self {
        Self::new(name, description, points, GoalKind::Eternal)
    }

    /// A fresh checklist goal with no completions recorded yet.
    pub fn checklist(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target_count: NonZeroU32,
        bonus_points: i64,
    ) -> Self {
        Self::new(
            name,
            description,
            points,
            GoalKind::Checklist {
                times_completed: 0,
                target_count,
                bonus_points,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base_points(&self) -> i64 {
        self.base_points
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    /// Applies one occurrence of progress and returns the points it earned.
    ///
    /// Recording on a completed simple goal, or on a checklist that already met
    /// its target, returns 0. The checklist counter still advances in that case.
    pub fn record_event(&mut self) -> i64 {
        match &mut self.kind {
            GoalKind::Simple { completed } => {
                if *completed {
                    return 0;
                }
                *completed = true;
                self.base_points
            }
            GoalKind::Eternal => self.base_points,
            GoalKind::Checklist {
                times_completed,
                target_count,
                bonus_points,
            } => {
                let before = *times_completed;
                let target = target_count.get();
                *times_completed = before.saturating_add(1);
                if before >= target {
                    0
                } else if before + 1 == target {
                    self.base_points.saturating_add(*bonus_points)
                } else {
                    self.base_points
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.kind {
            GoalKind::Simple { completed } => *completed,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                times_completed,
                target_count,
                ..
            } => *times_completed >= target_count.get(),
        }
    }

    /// Human-readable completion marker, e.g. `[X]` or `[ ] Completed 1/3`.
    pub fn status(&self) -> String {
        let mark = if self.is_complete() { "[X]" } else { "[ ]" };
        match &self.kind {
            GoalKind::Simple { .. } => mark.to_string(),
            GoalKind::Eternal => "[~]".to_string(),
            GoalKind::Checklist {
                times_completed,
                target_count,
                ..
            } => format!("{} Completed {}/{}", mark, times_completed, target_count),
        }
    }
}

/// Status followed by name, the way goals are listed to users.
impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.name)
    }
}
