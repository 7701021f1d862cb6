//! Priority scoring for flexible task placement.
//!
//! The placement order is a single weighted score over two terms:
//! deadline urgency and effort class. Ties are broken by ascending
//! duration so short tasks slot in first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Weights for the two score terms (alpha/beta).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight for deadline urgency (alpha)
    #[serde(default = "default_weight")]
    pub urgency: f64,
    /// Weight for effort class (beta)
    #[serde(default = "default_weight")]
    pub effort: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            urgency: 1.0,
            effort: 1.0,
        }
    }
}

/// Urgency term: inverse of the minutes left until the deadline,
/// saturating at one minute.
pub fn urgency(now: DateTime<Utc>, deadline: DateTime<Utc>) -> f64 {
    let minutes_left = (deadline - now).num_seconds() as f64 / 60.0;
    1.0 / minutes_left.max(1.0)
}

/// Placement score: `alpha * urgency + beta * effort_weight`.
pub fn score(weights: &ScoreWeights, now: DateTime<Utc>, task: &Task) -> f64 {
    weights.urgency * urgency(now, task.deadline_at) + weights.effort * task.effort.weight()
}

/// Order tasks for placement: descending score, ties broken by ascending
/// duration.
pub fn rank<'a>(weights: &ScoreWeights, now: DateTime<Utc>, tasks: Vec<&'a Task>) -> Vec<&'a Task> {
    let mut ranked: Vec<(f64, &Task)> = tasks
        .into_iter()
        .map(|t| (score(weights, now, t), t))
        .collect();
    ranked.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| a.1.duration_min.cmp(&b.1.duration_min))
    });
    ranked.into_iter().map(|(_, t)| t).collect()
}
