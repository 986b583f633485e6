//! # FitPulse Core Library
//!
//! Core business logic for the FitPulse fitness companion. The mobile app
//! is a thin rendering layer over a hosted backend; the one piece of real
//! computation is the daily task recommendation engine implemented here:
//! given today's completion snapshot plus habit, interest, and history
//! signals, it ranks a fixed catalog of daily tasks and returns the short
//! list to surface.
//!
//! ## Architecture
//!
//! - **Catalog**: closed registry of the five daily task kinds with their
//!   titles, importance weights, and cooldown windows
//! - **Snapshot**: the caller-supplied picture of the user's day, with all
//!   missing-data defaults applied in one normalization step
//! - **Scoring**: pure per-factor computation (goal gap, habit need,
//!   interest boost) minus cooldown/shown penalties
//! - **Recommendation**: orchestration across the catalog with a stable
//!   ranking and completed-task filtering
//!
//! The engine performs no I/O, keeps no state, and is total over its
//! inputs: malformed or missing optional data degrades to neutral defaults
//! instead of failing.
//!
//! ## Key Components
//!
//! - [`RecommendationEngine`]: scores the catalog against a snapshot
//! - [`DailySnapshot`]: input bundle from the day-status aggregation
//! - [`TaskCatalog`]: the fixed task registry
//! - [`ScoringWeights`]: tunable factor weights

pub mod catalog;
pub mod error;
pub mod recommend;
pub mod scoring;
pub mod snapshot;

pub use catalog::{TaskCatalog, TaskDefinition, TaskKind};
pub use error::ConfigError;
pub use recommend::{
    generate_recommendations, generate_recommendations_with_config, RecommendationConfig,
    RecommendationEngine, Recommendations, ScoredCandidate, DEFAULT_MAX_TASKS,
};
pub use scoring::{
    ScoreBreakdown, ScoringWeights, TaskScorer, INTEREST_BONUS, SHOWN_PENALTY, SHOWN_WINDOW_HOURS,
};
pub use snapshot::{
    parse_instant, DailySnapshot, ProgressMeta, TaskHistory, TaskInputs, TaskStatus,
    DEFAULT_ADHERENCE,
};
