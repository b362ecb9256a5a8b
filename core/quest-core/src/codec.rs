//! Line-oriented text format for a registry and its score.
//!
//! ```text
//! <score>
//! Simple|<name>|<description>|<basePoints>|<True|False>
//! Eternal|<name>|<description>|<basePoints>
//! Checklist|<name>|<description>|<basePoints>|<targetCount>|<bonusPoints>|<timesCompleted>
//! ```
//!
//! Fields are positional and `|` is never escaped, so a name or description that
//! contains it (or a line break) will not survive a round trip. Encoding logs a
//! warning when that happens.
//!
//! Decoding stops at the first bad line; callers get either the whole state or
//! an error, never a prefix of it.

use crate::error::{QuestError, Result};
use crate::goal::{Goal, GoalKind, CHECKLIST_TAG, ETERNAL_TAG, SIMPLE_TAG};
use std::num::NonZeroU32;
use std::str::FromStr;

/// Field delimiter within a record line.
pub const DELIMITER: char = '|';

const TRUE_TOKEN: &str = "True";
const FALSE_TOKEN: &str = "False";

/// Score and goals as decoded from text, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub score: i64,
    pub goals: Vec<Goal>,
}

/// Encodes a score and goals. Every line, the last included, ends with `\n`.
pub fn encode(score: i64, goals: &[Goal]) -> String {
    let mut out = format!("{}\n", score);
    for goal in goals {
        out.push_str(&encode_goal(goal));
        out.push('\n');
    }
    out
}

/// Encodes a single goal as one record line (without the trailing newline).
pub fn encode_goal(goal: &Goal) -> String {
    warn_if_unencodable(goal);

    let head = format!(
        "{tag}{d}{name}{d}{desc}{d}{points}",
        tag = goal.kind().tag(),
        d = DELIMITER,
        name = goal.name(),
        desc = goal.description(),
        points = goal.base_points(),
    );

    match goal.kind() {
        GoalKind::Simple { completed } => {
            let token = if *completed { TRUE_TOKEN } else { FALSE_TOKEN };
            format!("{}{}{}", head, DELIMITER, token)
        }
        GoalKind::Eternal => head,
        GoalKind::Checklist {
            times_completed,
            target_count,
            bonus_points,
        } => format!(
            "{head}{d}{target}{d}{bonus}{d}{times}",
            d = DELIMITER,
            target = target_count,
            bonus = bonus_points,
            times = times_completed,
        ),
    }
}

fn warn_if_unencodable(goal: &Goal) {
    let bad = |s: &str| s.contains(DELIMITER) || s.contains('\n') || s.contains('\r');
    if bad(goal.name()) || bad(goal.description()) {
        tracing::warn!(
            name = goal.name(),
            "Goal text contains a delimiter or line break and will not load back intact"
        );
    }
}

/// Decodes text produced by [`encode`].
///
/// Empty lines after the score are ignored. Any other line must be a valid
/// record, otherwise the whole decode fails.
pub fn decode(text: &str) -> Result<Decoded> {
    let mut lines = text.lines();

    let score_line = lines.next().unwrap_or("");
    let score = score_line
        .trim()
        .parse::<i64>()
        .map_err(|_| QuestError::MalformedScore {
            value: score_line.to_string(),
        })?;

    let mut goals = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        // Line 1 is the score.
        goals.push(decode_goal(line, offset + 2)?);
    }

    Ok(Decoded { score, goals })
}

/// Decodes one record line. `line_no` is only used in error messages.
pub fn decode_goal(line: &str, line_no: usize) -> Result<Goal> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let tag = fields[0];

    let expected = match tag {
        SIMPLE_TAG => 5,
        ETERNAL_TAG => 4,
        CHECKLIST_TAG => 7,
        other => {
            return Err(QuestError::malformed_record(
                line_no,
                format!("unknown goal type {:?}", other),
            ))
        }
    };
    if fields.len() != expected {
        return Err(QuestError::malformed_record(
            line_no,
            format!(
                "{} record needs {} fields, found {}",
                tag,
                expected,
                fields.len()
            ),
        ));
    }

    let name = fields[1];
    let description = fields[2];
    let base_points: i64 = parse_field(fields[3], "basePoints", line_no)?;

    let kind = match tag {
        SIMPLE_TAG => GoalKind::Simple {
            completed: parse_bool(fields[4], line_no)?,
        },
        ETERNAL_TAG => GoalKind::Eternal,
        _ => {
            let target: u32 = parse_field(fields[4], "targetCount", line_no)?;
            let target_count = NonZeroU32::new(target).ok_or_else(|| {
                QuestError::malformed_record(line_no, "targetCount must be greater than zero")
            })?;
            GoalKind::Checklist {
                target_count,
                bonus_points: parse_field(fields[5], "bonusPoints", line_no)?,
                times_completed: parse_field(fields[6], "timesCompleted", line_no)?,
            }
        }
    };

    Ok(Goal::new(name, description, base_points, kind))
}

fn parse_field<T: FromStr>(raw: &str, field: &str, line_no: usize) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        QuestError::malformed_record(line_no, format!("{} {:?} is not a valid number", field, raw))
    })
}

fn parse_bool(raw: &str, line_no: usize) -> Result<bool> {
    match raw {
        TRUE_TOKEN => Ok(true),
        FALSE_TOKEN => Ok(false),
        other => Err(QuestError::malformed_record(
            line_no,
            format!("completed flag {:?} is not True or False", other),
        )),
    }
}
