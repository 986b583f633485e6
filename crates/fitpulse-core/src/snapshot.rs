//! Today's input bundle for the recommendation engine.
//!
//! The hosted backend produces a per-day snapshot of completion statuses,
//! habit adherence, interests, and suggestion history. Every field is
//! optional from the caller's perspective; [`DailySnapshot::task_inputs`]
//! applies all missing-data defaults in one place so the scoring helpers
//! never repeat them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

use crate::catalog::TaskKind;

/// Neutral adherence assumed when the habit map has no entry for a kind.
pub const DEFAULT_ADHERENCE: f64 = 0.5;

/// Numeric progress attached to a status for goal-tracked kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMeta {
    /// Water intake in glasses
    Water { glasses: f64, goal_glasses: f64 },
    /// Protein intake in grams
    Protein { grams: f64, target_grams: f64 },
}

impl ProgressMeta {
    /// Fraction of the goal reached, clamped to [0.0, 1.0].
    ///
    /// A zero, negative, or non-finite goal means the target was never
    /// configured; progress is 0 in that case rather than a division
    /// error.
    pub fn fraction(&self) -> f64 {
        let (current, goal) = match *self {
            ProgressMeta::Water {
                glasses,
                goal_glasses,
            } => (glasses, goal_glasses),
            ProgressMeta::Protein {
                grams,
                target_grams,
            } => (grams, target_grams),
        };

        if goal > 0.0 && goal.is_finite() {
            let ratio = (current / goal).clamp(0.0, 1.0);
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        } else {
            0.0
        }
    }
}

/// Completion status for one task kind, for today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Whether the task is already done today
    #[serde(default)]
    pub completed: bool,
    /// Numeric progress, present only for goal-tracked kinds
    #[serde(default)]
    pub meta: Option<ProgressMeta>,
}

impl TaskStatus {
    /// Status for a finished task with no numeric meta.
    pub fn done() -> Self {
        Self {
            completed: true,
            meta: None,
        }
    }
}

/// Completion/surfacing history for one task kind.
///
/// Timestamps arrive as RFC 3339 strings from the backend; anything that
/// fails to parse deserializes to `None`, so bad history data can never
/// make scoring fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskHistory {
    /// When the task was last completed, if known
    #[serde(default, deserialize_with = "lenient_instant")]
    pub last_completed_at: Option<DateTime<Utc>>,
    /// When the task was last surfaced as a suggestion, if known
    #[serde(default, deserialize_with = "lenient_instant")]
    pub last_shown_at: Option<DateTime<Utc>>,
}

/// Parse an RFC 3339 timestamp, returning `None` for malformed input.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_instant))
}

/// Snapshot of everything known about the user's day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Today's per-kind completion statuses
    #[serde(default)]
    pub statuses: HashMap<TaskKind, TaskStatus>,
    /// Recent adherence per kind, each in [0.0, 1.0]
    #[serde(default)]
    pub habits: HashMap<TaskKind, f64>,
    /// Kinds the user has expressed interest in
    #[serde(default)]
    pub interests: HashSet<TaskKind>,
    /// Completion/surfacing history per kind
    #[serde(default)]
    pub history: HashMap<TaskKind, TaskHistory>,
}

impl DailySnapshot {
    /// Empty snapshot; every kind scores with neutral defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set today's status for a kind.
    pub fn with_status(mut self, kind: TaskKind, status: TaskStatus) -> Self {
        self.statuses.insert(kind, status);
        self
    }

    /// Set recent adherence for a kind.
    pub fn with_habit(mut self, kind: TaskKind, adherence: f64) -> Self {
        self.habits.insert(kind, adherence);
        self
    }

    /// Mark a kind as one the user cares about.
    pub fn with_interest(mut self, kind: TaskKind) -> Self {
        self.interests.insert(kind);
        self
    }

    /// Attach history for a kind.
    pub fn with_history(mut self, kind: TaskKind, history: TaskHistory) -> Self {
        self.history.insert(kind, history);
        self
    }

    /// Normalized per-kind view with every missing-data default applied.
    ///
    /// - no status recorded → not completed, no meta
    /// - no habit entry, or a non-finite one → neutral adherence
    /// - adherence outside [0, 1] → clamped
    /// - no history → no timestamps, so zero penalties downstream
    pub fn task_inputs(&self, kind: TaskKind) -> TaskInputs {
        let adherence = match self.habits.get(&kind) {
            Some(value) if value.is_finite() => value.clamp(0.0, 1.0),
            _ => DEFAULT_ADHERENCE,
        };

        TaskInputs {
            status: self.statuses.get(&kind).cloned().unwrap_or_default(),
            adherence,
            interested: self.interests.contains(&kind),
            history: self.history.get(&kind).cloned().unwrap_or_default(),
        }
    }
}

/// Fully defaulted inputs for scoring a single kind.
#[derive(Debug, Clone)]
pub struct TaskInputs {
    /// Today's status (defaulted if the snapshot had none)
    pub status: TaskStatus,
    /// Adherence in [0.0, 1.0]
    pub adherence: f64,
    /// Whether the user flagged this kind as an interest
    pub interested: bool,
    /// History timestamps (empty if the snapshot had none)
    pub history: TaskHistory,
}
