//! Week planning across a 7-day horizon.
//!
//! Runs the day machinery for 7 consecutive days, then assigns each
//! eligible flexible task to at most one day: tasks are taken in score
//! order and committed to the first day (within their deadline) where at
//! least one chunk fits, even when the full duration does not. The
//! single-assignment rule keeps a task from appearing on several days of
//! the overview.
//!
//! The planner takes an immutable board and returns the plan plus the
//! `planned_for` delta; caller-owned data is never mutated in place.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::IntervalSet;
use crate::scoring;
use crate::storage::PlannerConfig;
use crate::task::{Task, TaskBoard, TaskStatus, TemporalKind};

use super::{build_fixed_blocks, clock_on, place_flexible, PlanItem, PlannedFor};

/// Each horizon day is represented at a fixed reference time-of-day to
/// avoid day-boundary drift in date comparisons.
const REFERENCE_HOUR: u32 = 12;

/// One day of the week overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// Display label, e.g. "Mon 06.10"
    pub label: String,
    /// Placed intervals ordered by start time
    pub items: Vec<PlanItem>,
}

/// Result of a week planning pass. Ephemeral, like [`super::DayPlan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    pub days: Vec<WeekDay>,
    /// Tasks assigned to a day this week; the caller decides whether to
    /// write the stamps back
    pub planned: Vec<PlannedFor>,
}

/// Plan the 7 days starting at `now`'s date.
pub fn plan_week(config: &PlannerConfig, now: DateTime<Utc>, board: &TaskBoard) -> WeekPlan {
    let days: Vec<DateTime<Utc>> = (0..7)
        .filter_map(|i| clock_on(now + Duration::days(i), (REFERENCE_HOUR, 0)))
        .collect();

    let tasks: Vec<&Task> = board.active.values().collect();
    let mut per_day: Vec<(Vec<PlanItem>, IntervalSet)> = days
        .iter()
        .map(|day| build_fixed_blocks(config, *day, now, &tasks))
        .collect();

    // Week-wide eligibility: the deadline bounds the day scan below
    // rather than filtering the pool, and `planned_for` is ignored so an
    // already-stamped task still shows up somewhere in the overview.
    let flex: Vec<&Task> = tasks
        .iter()
        .copied()
        .filter(|t| {
            !t.done && t.kind() == TemporalKind::Flexible && t.auto && t.status == TaskStatus::Active
        })
        .collect();
    let flex = scoring::rank(&config.weights, now, flex);

    let mut planned = Vec::new();
    for task in flex {
        let last_day = days[6].min(task.deadline_at);
        for (i, day) in days.iter().enumerate() {
            if *day > last_day {
                break;
            }
            let (items, free) = &mut per_day[i];
            if place_flexible(config, free, items, task) > 0 {
                planned.push(PlannedFor {
                    task_id: task.id.clone(),
                    date: day.date_naive(),
                });
                // Committed: one day per task, even on a partial fit.
                break;
            }
        }
    }

    let days = days
        .iter()
        .zip(per_day)
        .map(|(day, (mut items, _))| {
            items.sort_by_key(|item| item.start);
            WeekDay {
                date: day.date_naive(),
                label: day.format("%a %d.%m").to_string(),
                items,
            }
        })
        .collect();
    WeekPlan { days, planned }
}
