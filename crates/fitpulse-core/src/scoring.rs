//! Per-factor scoring for daily task recommendations.
//!
//! Computes a weighted score for each task kind from three positive
//! factors:
//! - Goal gap (how far from done; larger = more urgent)
//! - Habit need (inverse of recent adherence; nudges neglected habits)
//! - Interest boost (small flat bonus for expressed preferences)
//!
//! minus two independent penalties that demote recently handled tasks:
//! a linearly decaying cooldown penalty after completion, and a flat
//! penalty for suggestions surfaced within the last hour.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{TaskDefinition, TaskKind};
use crate::error::{ConfigError, Result};
use crate::snapshot::{TaskInputs, TaskStatus};

/// Flat bonus applied when the user has expressed interest in a kind.
///
/// Small next to the gap/habit terms, so preference alone cannot outrank
/// urgency.
pub const INTEREST_BONUS: f64 = 0.2;

/// Flat penalty for a suggestion surfaced within the last hour.
pub const SHOWN_PENALTY: f64 = 0.2;

/// Window (hours) during which the shown penalty applies.
pub const SHOWN_WINDOW_HOURS: f64 = 1.0;

// Thresholds for the rationale fragments.
const GAP_FAR: f64 = 0.7;
const GAP_PARTIAL: f64 = 0.3;
const HABIT_WEAK: f64 = 0.6;
const HABIT_SOFT: f64 = 0.3;

/// Weights for the three positive scoring factors.
///
/// The defaults sum to 1.0 and rank urgency over habit correction over
/// preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for the goal gap factor (default 0.45)
    pub gap_weight: f64,
    /// Weight for the habit need factor (default 0.35)
    pub habit_weight: f64,
    /// Weight for the interest boost factor (default 0.20)
    pub interest_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gap_weight: 0.45,
            habit_weight: 0.35,
            interest_weight: 0.20,
        }
    }
}

impl ScoringWeights {
    /// Check that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gap_weight", self.gap_weight),
            ("habit_weight", self.habit_weight),
            ("interest_weight", self.interest_weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Factor-by-factor decomposition of one task's score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Fraction of the way to done, in [0.0, 1.0]
    pub progress: f64,
    /// 1 - progress
    pub gap: f64,
    /// 1 - adherence
    pub habit_need: f64,
    /// [`INTEREST_BONUS`] or 0
    pub interest_boost: f64,
    /// Decaying penalty while inside the cooldown window
    pub cooldown_penalty: f64,
    /// Flat penalty for a recently surfaced suggestion
    pub shown_penalty: f64,
    /// Final weighted score; higher surfaces sooner
    pub score: f64,
}

impl ScoreBreakdown {
    /// Human-readable rationale assembled from the dominant factors.
    ///
    /// Advisory output for display and debugging; ranking uses `score`
    /// alone.
    pub fn reason(&self) -> String {
        let gap_fragment = if self.gap > GAP_FAR {
            "far from goal"
        } else if self.gap > GAP_PARTIAL {
            "progress remaining"
        } else {
            "almost done"
        };

        let habit_fragment = if self.habit_need > HABIT_WEAK {
            "weak habit"
        } else if self.habit_need > HABIT_SOFT {
            "could improve"
        } else {
            "solid habit"
        };

        let mut fragments = vec![gap_fragment, habit_fragment];
        if self.interest_boost > 0.0 {
            fragments.push("matches interests");
        }
        if self.cooldown_penalty + self.shown_penalty > 0.0 {
            fragments.push("recently handled");
        }

        fragments.join(", ")
    }
}

/// Scores a single task kind from its normalized inputs.
///
/// The clock is sampled once at construction and reused for every
/// elapsed-time calculation, so all penalties within one pass agree on
/// "now".
#[derive(Debug, Clone)]
pub struct TaskScorer {
    weights: ScoringWeights,
    now: DateTime<Utc>,
}

impl TaskScorer {
    /// Scorer with default weights, sampling the clock once.
    pub fn new() -> Self {
        Self {
            weights: ScoringWeights::default(),
            now: Utc::now(),
        }
    }

    /// Scorer with explicit weights and clock.
    pub fn with_weights(weights: ScoringWeights, now: DateTime<Utc>) -> Self {
        Self { weights, now }
    }

    /// Score one kind, keeping the factor values for the rationale.
    pub fn score(&self, definition: &TaskDefinition, inputs: &TaskInputs) -> ScoreBreakdown {
        let progress = progress(definition.kind, &inputs.status);
        let gap = 1.0 - progress;
        let habit_need = 1.0 - inputs.adherence;
        let interest_boost = if inputs.interested { INTEREST_BONUS } else { 0.0 };
        let cooldown_penalty =
            self.cooldown_penalty(definition, inputs.history.last_completed_at);
        let shown_penalty = self.shown_penalty(inputs.history.last_shown_at);

        let weighted = self.weights.gap_weight * gap
            + self.weights.habit_weight * habit_need
            + self.weights.interest_weight * interest_boost;
        let score = definition.base_weight * weighted - (cooldown_penalty + shown_penalty);

        ScoreBreakdown {
            progress,
            gap,
            habit_need,
            interest_boost,
            cooldown_penalty,
            shown_penalty,
            score,
        }
    }

    /// Linearly decaying penalty while a completed task sits inside its
    /// cooldown window.
    ///
    /// No completion timestamp, a zero-cooldown definition, or an expired
    /// window all yield 0. Otherwise the penalty is
    /// `(cooldown - elapsed) / max(1, cooldown)`, in (0, 1]. A completion
    /// timestamp in the future (clock skew) counts as zero elapsed hours.
    fn cooldown_penalty(
        &self,
        definition: &TaskDefinition,
        last_completed_at: Option<DateTime<Utc>>,
    ) -> f64 {
        let Some(completed_at) = last_completed_at else {
            return 0.0;
        };

        let cooldown = definition.cooldown_hours;
        if cooldown <= 0.0 || !cooldown.is_finite() {
            return 0.0;
        }

        let elapsed = hours_between(completed_at, self.now).max(0.0);
        if elapsed >= cooldown {
            return 0.0;
        }

        (cooldown - elapsed) / cooldown.max(1.0)
    }

    /// Flat penalty if the suggestion was surfaced within the last hour.
    fn shown_penalty(&self, last_shown_at: Option<DateTime<Utc>>) -> f64 {
        let Some(shown_at) = last_shown_at else {
            return 0.0;
        };

        let elapsed = hours_between(shown_at, self.now).max(0.0);
        if elapsed < SHOWN_WINDOW_HOURS {
            SHOWN_PENALTY
        } else {
            0.0
        }
    }
}

impl Default for TaskScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of the way to done for a kind, in [0.0, 1.0].
///
/// Goal-tracked kinds read their numeric meta (absent meta counts as no
/// progress); binary kinds are all-or-nothing on the completion flag.
pub fn progress(kind: TaskKind, status: &TaskStatus) -> f64 {
    if kind.has_numeric_goal() {
        status.meta.map_or(0.0, |meta| meta.fraction())
    } else if status.completed {
        1.0
    } else {
        0.0
    }
}

fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskCatalog;
    use crate::snapshot::{DailySnapshot, ProgressMeta, TaskHistory};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn utc_datetime(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
    }

    fn water_status(glasses: f64, goal_glasses: f64) -> TaskStatus {
        TaskStatus {
            completed: false,
            meta: Some(ProgressMeta::Water {
                glasses,
                goal_glasses,
            }),
        }
    }

    #[test]
    fn test_progress_numeric_vs_binary() {
        let partial = water_status(2.0, 8.0);
        assert!((progress(TaskKind::Water, &partial) - 0.25).abs() < 1e-12);

        // Numeric kind without meta: no configured goal, no progress.
        assert_eq!(progress(TaskKind::Protein, &TaskStatus::done()), 0.0);

        assert_eq!(progress(TaskKind::Workout, &TaskStatus::done()), 1.0);
        assert_eq!(progress(TaskKind::Meal, &TaskStatus::default()), 0.0);
    }

    #[test]
    fn test_score_formula_matches_hand_computation() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let catalog = TaskCatalog::new();
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);

        let snapshot = DailySnapshot::new()
            .with_status(TaskKind::Workout, TaskStatus::default())
            .with_habit(TaskKind::Workout, 0.3)
            .with_interest(TaskKind::Workout);

        let breakdown = scorer.score(
            catalog.definition(TaskKind::Workout),
            &snapshot.task_inputs(TaskKind::Workout),
        );

        // 1.2 * (0.45*1.0 + 0.35*0.7 + 0.20*0.2) = 1.2 * 0.735 = 0.882
        assert!((breakdown.gap - 1.0).abs() < 1e-12);
        assert!((breakdown.habit_need - 0.7).abs() < 1e-12);
        assert_eq!(breakdown.interest_boost, INTEREST_BONUS);
        assert!((breakdown.score - 0.882).abs() < 1e-9);
    }

    #[test]
    fn test_cooldown_decays_linearly() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let catalog = TaskCatalog::new();
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);
        let workout = catalog.definition(TaskKind::Workout);

        // 1 hour into a 6 hour cooldown: (6-1)/6
        let one_hour_ago = Some(now - Duration::hours(1));
        let penalty = scorer.cooldown_penalty(workout, one_hour_ago);
        assert!((penalty - 5.0 / 6.0).abs() < 1e-9);

        // Exactly at the window edge and past it: expired.
        let six_hours_ago = Some(now - Duration::hours(6));
        assert_eq!(scorer.cooldown_penalty(workout, six_hours_ago), 0.0);

        let ten_hours_ago = Some(now - Duration::hours(10));
        assert_eq!(scorer.cooldown_penalty(workout, ten_hours_ago), 0.0);

        assert_eq!(scorer.cooldown_penalty(workout, None), 0.0);
    }

    #[test]
    fn test_cooldown_denominator_floors_at_one() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);
        let definition = TaskDefinition {
            kind: TaskKind::Water,
            title: "Drink water".to_string(),
            base_weight: 1.0,
            cooldown_hours: 0.5,
        };

        // Sub-hour cooldowns divide by 1, keeping the penalty <= 1.
        let just_now = Some(now - Duration::minutes(6));
        let penalty = scorer.cooldown_penalty(&definition, just_now);
        assert!((penalty - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_cooldown_tolerates_future_timestamp() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let catalog = TaskCatalog::new();
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);
        let workout = catalog.definition(TaskKind::Workout);

        let in_the_future = Some(now + Duration::hours(2));
        let penalty = scorer.cooldown_penalty(workout, in_the_future);
        assert!((penalty - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shown_penalty_window_boundary() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);

        let half_hour_ago = Some(now - Duration::minutes(30));
        assert_eq!(scorer.shown_penalty(half_hour_ago), SHOWN_PENALTY);

        let ninety_minutes_ago = Some(now - Duration::minutes(90));
        assert_eq!(scorer.shown_penalty(ninety_minutes_ago), 0.0);

        // Exactly one hour counts as outside the window.
        let one_hour_ago = Some(now - Duration::hours(1));
        assert_eq!(scorer.shown_penalty(one_hour_ago), 0.0);

        assert_eq!(scorer.shown_penalty(None), 0.0);
    }

    #[test]
    fn test_penalties_can_drive_score_negative() {
        let now = utc_datetime(2026, 3, 1, 12, 0);
        let catalog = TaskCatalog::new();
        let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);

        let history = TaskHistory {
            last_completed_at: Some(now - Duration::hours(1)),
            last_shown_at: Some(now - Duration::minutes(10)),
        };
        let snapshot = DailySnapshot::new().with_history(TaskKind::Workout, history);

        let breakdown = scorer.score(
            catalog.definition(TaskKind::Workout),
            &snapshot.task_inputs(TaskKind::Workout),
        );

        // 1.2 * 0.625 - (5/6 + 0.2) < 0
        assert!(breakdown.score < 0.0);
        assert!(breakdown.cooldown_penalty > 0.0);
        assert_eq!(breakdown.shown_penalty, SHOWN_PENALTY);
    }

    #[test]
    fn test_reason_fragments() {
        let far = ScoreBreakdown {
            progress: 0.0,
            gap: 1.0,
            habit_need: 0.7,
            interest_boost: INTEREST_BONUS,
            cooldown_penalty: 0.0,
            shown_penalty: 0.0,
            score: 0.882,
        };
        assert_eq!(far.reason(), "far from goal, weak habit, matches interests");

        let nearly_done = ScoreBreakdown {
            progress: 0.9,
            gap: 0.1,
            habit_need: 0.2,
            interest_boost: 0.0,
            cooldown_penalty: 0.3,
            shown_penalty: 0.0,
            score: 0.0,
        };
        assert_eq!(nearly_done.reason(), "almost done, solid habit, recently handled");

        let middling = ScoreBreakdown {
            progress: 0.5,
            gap: 0.5,
            habit_need: 0.5,
            interest_boost: 0.0,
            cooldown_penalty: 0.0,
            shown_penalty: 0.0,
            score: 0.5,
        };
        assert_eq!(middling.reason(), "progress remaining, could improve");
    }

    #[test]
    fn test_weights_validate() {
        assert!(ScoringWeights::default().validate().is_ok());

        let negative = ScoringWeights {
            gap_weight: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let non_finite = ScoringWeights {
            habit_weight: f64::NAN,
            ..Default::default()
        };
        assert!(non_finite.validate().is_err());
    }

    proptest! {
        // More progress never raises a numeric task's score.
        #[test]
        fn prop_score_non_increasing_in_progress(
            glasses in 0.0f64..16.0,
            extra in 0.0f64..16.0,
        ) {
            let now = utc_datetime(2026, 3, 1, 12, 0);
            let catalog = TaskCatalog::new();
            let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);
            let water = catalog.definition(TaskKind::Water);

            let less = DailySnapshot::new()
                .with_status(TaskKind::Water, water_status(glasses, 8.0));
            let more = DailySnapshot::new()
                .with_status(TaskKind::Water, water_status(glasses + extra, 8.0));

            let score_less = scorer.score(water, &less.task_inputs(TaskKind::Water)).score;
            let score_more = scorer.score(water, &more.task_inputs(TaskKind::Water)).score;

            prop_assert!(score_more <= score_less + 1e-12);
        }

        // Weaker habits strictly raise the score when no penalty applies.
        #[test]
        fn prop_weaker_habit_scores_strictly_higher(
            low in 0.0f64..0.45,
            high in 0.55f64..1.0,
        ) {
            let now = utc_datetime(2026, 3, 1, 12, 0);
            let catalog = TaskCatalog::new();
            let scorer = TaskScorer::with_weights(ScoringWeights::default(), now);
            let workout = catalog.definition(TaskKind::Workout);

            let weak = DailySnapshot::new().with_habit(TaskKind::Workout, low);
            let strong = DailySnapshot::new().with_habit(TaskKind::Workout, high);

            let weak_score = scorer.score(workout, &weak.task_inputs(TaskKind::Workout)).score;
            let strong_score = scorer.score(workout, &strong.task_inputs(TaskKind::Workout)).score;

            prop_assert!(weak_score > strong_score);
        }
    }
}
