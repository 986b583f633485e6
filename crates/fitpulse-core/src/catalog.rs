//! Fixed catalog of daily task kinds.
//!
//! The catalog is a closed registry: five task kinds, each with a display
//! title, a relative importance weight, and a cooldown window applied after
//! completion. Definitions are built once and never change at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of daily task kinds the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Drink enough water across the day
    Water,
    /// Reach the daily protein target
    Protein,
    /// Log at least one workout
    Workout,
    /// Complete a mental check-in
    Mental,
    /// Log at least one meal
    Meal,
}

impl TaskKind {
    /// All kinds in catalog declaration order.
    ///
    /// This order doubles as the tie-break order when two tasks score
    /// identically.
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Water,
        TaskKind::Protein,
        TaskKind::Workout,
        TaskKind::Mental,
        TaskKind::Meal,
    ];

    /// Whether this kind tracks numeric progress toward a goal.
    ///
    /// Binary kinds (`workout`, `mental`, `meal`) derive progress from the
    /// completion flag alone.
    pub fn has_numeric_goal(&self) -> bool {
        matches!(self, TaskKind::Water | TaskKind::Protein)
    }

    /// Stable identifier used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Water => "water",
            TaskKind::Protein => "protein",
            TaskKind::Workout => "workout",
            TaskKind::Mental => "mental",
            TaskKind::Meal => "meal",
        }
    }

    /// Position in [`TaskKind::ALL`].
    fn index(&self) -> usize {
        match self {
            TaskKind::Water => 0,
            TaskKind::Protein => 1,
            TaskKind::Workout => 2,
            TaskKind::Mental => 3,
            TaskKind::Meal => 4,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static definition for one task kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Which kind this definition describes
    pub kind: TaskKind,
    /// Display title shown to the user
    pub title: String,
    /// Relative importance multiplier (positive)
    pub base_weight: f64,
    /// Hours after completion before the task may surface again at full
    /// urgency
    pub cooldown_hours: f64,
}

/// The fixed task catalog.
///
/// Holds exactly one definition per [`TaskKind`], in declaration order, so
/// lookups never fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCatalog {
    definitions: [TaskDefinition; 5],
}

impl Default for TaskCatalog {
    fn default() -> Self {
        let def = |kind, title: &str, base_weight: f64, cooldown_hours: f64| TaskDefinition {
            kind,
            title: title.to_string(),
            base_weight,
            cooldown_hours,
        };

        Self {
            definitions: [
                def(TaskKind::Water, "Drink water", 1.0, 1.0),
                def(TaskKind::Protein, "Hit protein target", 1.1, 4.0),
                def(TaskKind::Workout, "Log a workout", 1.2, 6.0),
                def(TaskKind::Mental, "Mental check-in", 0.9, 6.0),
                def(TaskKind::Meal, "Log a meal", 1.0, 4.0),
            ],
        }
    }
}

impl TaskCatalog {
    /// Create the catalog with its built-in definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the definition for a kind.
    pub fn definition(&self, kind: TaskKind) -> &TaskDefinition {
        &self.definitions[kind.index()]
    }

    /// Iterate definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.definitions.iter()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// The catalog is never empty; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
