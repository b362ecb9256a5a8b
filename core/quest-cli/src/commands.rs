//! Subcommand handlers.
//!
//! Each invocation opens the working goals file (if any), applies one
//! operation through [`QuestEngine`], and writes the file back when the
//! operation changed state. Goals are numbered from 1 for users.

use quest_core::codec::DELIMITER;
use quest_core::{load_config_with_storage, Goal, QuestEngine, QuestError, StorageConfig};
use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error("No storage directory: set QUEST_HOME or pass --root")]
    NoStorageRoot,

    #[error("Invalid selection: goals are numbered from 1")]
    InvalidSelection,

    #[error("Goal {field} may not contain '|' or line breaks")]
    UnencodableText { field: &'static str },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Fields every new goal needs.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub description: String,
    pub points: i64,
}

#[derive(Debug, Clone)]
pub enum GoalSpec {
    Simple(NewGoal),
    Eternal(NewGoal),
    Checklist {
        goal: NewGoal,
        target: NonZeroU32,
        bonus: i64,
    },
}

impl NewGoal {
    /// Rejects text the goals file can't store.
    fn validate(&self) -> Result<(), CliError> {
        let unencodable = |s: &str| s.contains(DELIMITER) || s.contains('\n') || s.contains('\r');
        if unencodable(&self.name) {
            return Err(CliError::UnencodableText { field: "name" });
        }
        if unencodable(&self.description) {
            return Err(CliError::UnencodableText {
                field: "description",
            });
        }
        Ok(())
    }
}

impl GoalSpec {
    fn fields(&self) -> &NewGoal {
        match self {
            GoalSpec::Simple(g) | GoalSpec::Eternal(g) => g,
            GoalSpec::Checklist { goal, .. } => goal,
        }
    }

    fn build(self) -> Goal {
        match self {
            GoalSpec::Simple(g) => Goal::simple(g.name, g.description, g.points),
            GoalSpec::Eternal(g) => Goal::eternal(g.name, g.description, g.points),
            GoalSpec::Checklist {
                goal: g,
                target,
                bonus,
            } => Goal::checklist(g.name, g.description, g.points, target, bonus),
        }
    }
}

/// One caller-facing operation.
#[derive(Debug, Clone)]
pub enum Action {
    Create(GoalSpec),
    List,
    /// 1-based goal number as shown by `list`.
    Record(usize),
    Score,
    Save(PathBuf),
    Load(PathBuf),
}

/// Working state for one invocation.
pub struct Session {
    goals_path: PathBuf,
    engine: QuestEngine,
}

impl Session {
    /// Opens the working goals file under `storage`, or starts empty if there is none.
    pub fn open(storage: &StorageConfig) -> Result<Self, CliError> {
        let mut session = Self::open_unloaded(storage)?;
        if session.goals_path.exists() {
            session.engine.load(&session.goals_path)?;
        } else {
            tracing::debug!(
                path = %session.goals_path.display(),
                "No goals file yet, starting empty"
            );
        }
        Ok(session)
    }

    /// Resolves the working goals file without reading it.
    fn open_unloaded(storage: &StorageConfig) -> Result<Self, CliError> {
        storage.ensure_root()?;
        let config = load_config_with_storage(storage)?;
        Ok(Self {
            goals_path: storage.goals_file(&config.goals_file),
            engine: QuestEngine::new(),
        })
    }

    pub fn goals_path(&self) -> &Path {
        &self.goals_path
    }

    /// Runs `action`, printing results to `out`.
    pub fn run(&mut self, action: Action, out: &mut impl Write) -> Result<(), CliError> {
        match action {
            Action::Create(spec) => {
                spec.fields().validate()?;
                let goal = spec.build();
                writeln!(out, "Created goal: {}", goal.name())?;
                self.engine.add_goal(goal);
                self.persist()?;
            }
            Action::List => self.list(out)?,
            Action::Record(number) => {
                let index = number.checked_sub(1).ok_or(CliError::InvalidSelection)?;
                let outcome = self.engine.record_event_on(index)?;
                self.persist()?;
                writeln!(out, "You earned {} points!", outcome.points_earned)?;
                writeln!(out, "Current Score: {}", outcome.new_score)?;
            }
            Action::Score => writeln!(out, "Current Score: {}", self.engine.current_score())?,
            Action::Save(path) => {
                self.engine.save(&path)?;
                writeln!(out, "Goals saved to {}.", path.display())?;
            }
            Action::Load(path) => {
                self.engine.load(&path)?;
                self.persist()?;
                writeln!(
                    out,
                    "Goals loaded from {} ({} goals, score {}).",
                    path.display(),
                    self.engine.goals().len(),
                    self.engine.current_score()
                )?;
            }
        }
        Ok(())
    }

    fn list(&self, out: &mut impl Write) -> Result<(), CliError> {
        let goals = self.engine.list_goals();
        if goals.is_empty() {
            writeln!(out, "No goals yet.")?;
            return Ok(());
        }
        writeln!(out, "Your Goals:")?;
        for summary in goals {
            writeln!(
                out,
                "{}. {} {}",
                summary.position + 1,
                summary.status,
                summary.name
            )?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), CliError> {
        self.engine.save(&self.goals_path)?;
        Ok(())
    }
}

/// Opens a session suited to `action` and runs it.
///
/// `load` replaces the working file wholesale, so it doesn't read the current
/// one first; a damaged working file can always be recovered that way.
pub fn execute(
    storage: &StorageConfig,
    action: Action,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut session = match action {
        Action::Load(_) => Session::open_unloaded(storage)?,
        _ => Session::open(storage)?,
    };
    tracing::debug!(path = %session.goals_path().display(), ?action, "Running command");
    session.run(action, out)
}
