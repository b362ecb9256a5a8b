//! quest: command-line client for the Eternal Quest goal tracker.
//!
//! Every invocation works against the goals file in the storage root
//! (`--root`, `$QUEST_HOME`, or `~/.eternal-quest`).
//!
//! ## Subcommands
//!
//! - `create simple|eternal|checklist`: Add a goal
//! - `list`: Show goals with their status
//! - `record <NUMBER>`: Record progress on a goal and report the points earned
//! - `score`: Show the running score
//! - `save <PATH>` / `load <PATH>`: Export to, or replace state from, another file

mod commands;
mod logging;

use clap::{Args, Parser, Subcommand};
use commands::{Action, CliError, GoalSpec, NewGoal};
use quest_core::StorageConfig;
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quest")]
#[command(about = "Track goals and earn points for progress")]
#[command(version)]
struct Cli {
    /// Storage directory (overrides QUEST_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal
    Create {
        #[command(subcommand)]
        kind: CreateKind,
    },

    /// List goals with their completion status
    List,

    /// Record an event on a goal
    Record {
        /// Goal number as shown by `list`
        #[arg(value_name = "NUMBER")]
        number: usize,
    },

    /// Display the current score
    Score,

    /// Save goals and score to a file
    Save {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Replace goals and score with the contents of a file
    Load {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CreateKind {
    /// A goal completed once
    Simple(GoalArgs),

    /// A goal that is never complete and pays every time
    Eternal(GoalArgs),

    /// A goal completed a set number of times, with a bonus at the end
    Checklist {
        #[command(flatten)]
        goal: GoalArgs,

        /// Number of completions needed for the bonus
        #[arg(long)]
        target: NonZeroU32,

        /// Bonus points awarded on the final completion
        #[arg(long, allow_negative_numbers = true)]
        bonus: i64,
    },
}

#[derive(Args)]
struct GoalArgs {
    name: String,

    description: String,

    /// Points awarded per recorded event
    #[arg(allow_negative_numbers = true)]
    points: i64,
}

impl From<GoalArgs> for NewGoal {
    fn from(args: GoalArgs) -> Self {
        NewGoal {
            name: args.name,
            description: args.description,
            points: args.points,
        }
    }
}

impl From<Commands> for Action {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Create { kind } => Action::Create(match kind {
                CreateKind::Simple(args) => GoalSpec::Simple(args.into()),
                CreateKind::Eternal(args) => GoalSpec::Eternal(args.into()),
                CreateKind::Checklist {
                    goal,
                    target,
                    bonus,
                } => GoalSpec::Checklist {
                    goal: goal.into(),
                    target,
                    bonus,
                },
            }),
            Commands::List => Action::List,
            Commands::Record { number } => Action::Record(number),
            Commands::Score => Action::Score,
            Commands::Save { path } => Action::Save(path),
            Commands::Load { path } => Action::Load(path),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let storage = match cli.root {
        Some(root) => Some(StorageConfig::with_root(root)),
        None => StorageConfig::from_env(),
    };
    let Some(storage) = storage else {
        eprintln!("Error: {}", CliError::NoStorageRoot);
        std::process::exit(1);
    };

    let _logging_guard = logging::init(&storage.logs_dir());

    if let Err(e) = run(&storage, cli.command.into()) {
        tracing::error!(error = %e, "quest command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(storage: &StorageConfig, action: Action) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    commands::execute(storage, action, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_checklist_with_negative_bonus() {
        let cli = Cli::try_parse_from([
            "quest", "create", "checklist", "Pray", "Daily prayer", "50", "--target", "3",
            "--bonus", "-10",
        ])
        .unwrap();

        match Action::from(cli.command) {
            Action::Create(GoalSpec::Checklist {
                goal,
                target,
                bonus,
            }) => {
                assert_eq!(goal.name, "Pray");
                assert_eq!(goal.points, 50);
                assert_eq!(target.get(), 3);
                assert_eq!(bonus, -10);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_zero_target_rejected_by_parser() {
        let result = Cli::try_parse_from([
            "quest", "create", "checklist", "a", "b", "1", "--target", "0", "--bonus", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_points_for_eternal_goal() {
        let cli =
            Cli::try_parse_from(["quest", "create", "eternal", "Soda", "Penalty", "-20"]).unwrap();
        match Action::from(cli.command) {
            Action::Create(GoalSpec::Eternal(goal)) => assert_eq!(goal.points, -20),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
