//! Recommendation generation over the full task catalog.
//!
//! Scores every catalog kind against today's snapshot, sorts the results,
//! and splits them into the full ranked list and the short list of
//! incomplete tasks to surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{TaskCatalog, TaskKind};
use crate::error::Result;
use crate::scoring::{ScoringWeights, TaskScorer};
use crate::snapshot::DailySnapshot;

/// How many incomplete tasks to surface by default.
pub const DEFAULT_MAX_TASKS: usize = 3;

/// Tuning for one recommendation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Scoring factor weights
    pub weights: ScoringWeights,
    /// Maximum number of incomplete tasks to surface (default 3)
    pub max_tasks: usize,
    /// Clock sample used for every elapsed-time calculation in the pass
    pub current_time: DateTime<Utc>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            max_tasks: DEFAULT_MAX_TASKS,
            current_time: Utc::now(),
        }
    }
}

impl RecommendationConfig {
    /// Check the tunable fields.
    ///
    /// [`RecommendationEngine::generate`] accepts any config; validation
    /// is for callers that surface tuning to users.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.max_tasks == 0 {
            return Err(crate::error::ConfigError::ZeroMaxTasks);
        }
        Ok(())
    }
}

/// One scored catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Which task this is
    pub kind: TaskKind,
    /// Display title from the catalog
    pub title: String,
    /// Completion flag echoed from today's status
    pub completed: bool,
    /// Final score; higher = more urgent to suggest
    pub score: f64,
    /// Rationale assembled from the dominant factors
    pub reason: String,
}

/// Output of a recommendation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    /// Incomplete tasks only, best first, at most `max_tasks` entries
    pub results: Vec<ScoredCandidate>,
    /// Every catalog entry, best first, completed ones included
    pub all: Vec<ScoredCandidate>,
}

/// Recommendation engine for the daily task catalog.
pub struct RecommendationEngine {
    catalog: TaskCatalog,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Engine with the built-in catalog and default tuning.
    pub fn new() -> Self {
        Self {
            catalog: TaskCatalog::default(),
            config: RecommendationConfig::default(),
        }
    }

    /// Engine with custom tuning.
    pub fn with_config(config: RecommendationConfig) -> Self {
        Self {
            catalog: TaskCatalog::default(),
            config,
        }
    }

    /// Score the full catalog against today's snapshot.
    ///
    /// Total over any snapshot: kinds with no recorded status score as
    /// untouched, and every catalog entry appears in `all` exactly once.
    pub fn generate(&self, snapshot: &DailySnapshot) -> Recommendations {
        let scorer =
            TaskScorer::with_weights(self.config.weights.clone(), self.config.current_time);

        let mut all: Vec<ScoredCandidate> = TaskKind::ALL
            .iter()
            .map(|&kind| {
                let definition = self.catalog.definition(kind);
                let inputs = snapshot.task_inputs(kind);
                let breakdown = scorer.score(definition, &inputs);

                ScoredCandidate {
                    kind,
                    title: definition.title.clone(),
                    completed: inputs.status.completed,
                    score: breakdown.score,
                    reason: breakdown.reason(),
                }
            })
            .collect();

        // Stable sort: equal scores keep catalog order.
        all.sort_by(|a, b| b.score.total_cmp(&a.score));

        let results = all
            .iter()
            .filter(|candidate| !candidate.completed)
            .take(self.config.max_tasks)
            .cloned()
            .collect();

        Recommendations { results, all }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Score today's snapshot with default tuning.
pub fn generate_recommendations(snapshot: &DailySnapshot) -> Recommendations {
    RecommendationEngine::new().generate(snapshot)
}

/// Score today's snapshot with custom tuning.
pub fn generate_recommendations_with_config(
    snapshot: &DailySnapshot,
    config: &RecommendationConfig,
) -> Recommendations {
    RecommendationEngine::with_config(config.clone()).generate(snapshot)
}
