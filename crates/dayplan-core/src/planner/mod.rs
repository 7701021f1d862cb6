//! Single-day planning.
//!
//! A planning pass runs three stages over one calendar day:
//! - computes the operating window from the configured clock bounds,
//!   clipped to `now` when the target day is today
//! - materializes fixed blocks (meals, fixed-time tasks, recurring tasks
//!   matching the weekday) into the window in start order, subtracting
//!   each from free time as it is placed
//! - places eligible flexible tasks in score order via chunked first-fit
//!
//! Overlapping fixed blocks are not merged or conflict-checked: the
//! later block in sort order subtracts from whatever free time remains,
//! so displayed occupancy can overlap while the free-time ledger stays
//! consistent. Infeasibility is never an error -- an empty window or an
//! unplaceable chunk yields an empty or partial plan.

pub mod week;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::IntervalSet;
use crate::scoring;
use crate::storage::PlannerConfig;
use crate::task::{parse_hm, Effort, Task, TaskBoard, TaskStatus, TemporalKind};

/// A placed interval in a day's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Display label
    pub label: String,
    /// Originating task; absent for fixed non-task blocks such as meals
    pub task_id: Option<String>,
}

/// A `planned_for` stamp produced by a planning pass, to be written back
/// through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFor {
    pub task_id: String,
    pub date: NaiveDate,
}

/// Result of a single-day planning pass. Ephemeral: recomputed on every
/// call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Placed intervals ordered by start time
    pub items: Vec<PlanItem>,
    /// Tasks whose `planned_for` changed (applied to the board only when
    /// the caller requested persistence)
    pub planned: Vec<PlannedFor>,
}

/// Put a clock time on a calendar day.
pub(crate) fn clock_on(day: DateTime<Utc>, (hour, minute): (u32, u32)) -> Option<DateTime<Utc>> {
    day.date_naive()
        .and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
}

/// Operating window for a day, clipped to `now` when the day is today.
///
/// Returns `None` when the window is empty or inverted -- "the day is
/// over" is a valid terminal state, not an error.
pub fn day_window(
    config: &PlannerConfig,
    day: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut start = clock_on(day, parse_hm(&config.day_start)?)?;
    let end = clock_on(day, parse_hm(&config.day_end)?)?;
    if day.date_naive() == now.date_naive() {
        start = start.max(now);
    }
    if end <= start {
        return None;
    }
    Some((start, end))
}

struct FixedBlock {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    label: String,
    task_id: Option<String>,
}

/// Materialize the day's non-movable blocks and carve them out of the
/// window. Blocks are clipped to the window, sorted by clipped start,
/// and applied via sequential subtraction.
pub(crate) fn build_fixed_blocks(
    config: &PlannerConfig,
    day: DateTime<Utc>,
    now: DateTime<Utc>,
    tasks: &[&Task],
) -> (Vec<PlanItem>, IntervalSet) {
    let Some((win_start, win_end)) = day_window(config, day, now) else {
        return (Vec::new(), IntervalSet::default());
    };
    let mut free = IntervalSet::window(win_start, win_end);
    let mut blocks: Vec<FixedBlock> = Vec::new();

    for meal in &config.meals {
        let Some(start) = parse_hm(&meal.start).and_then(|hm| clock_on(day, hm)) else {
            continue;
        };
        let end = start + Duration::minutes(i64::from(meal.duration_min));
        if end > win_start && start < win_end {
            blocks.push(FixedBlock {
                start: start.max(win_start),
                end: end.min(win_end),
                label: meal.label.clone(),
                task_id: None,
            });
        }
    }

    for t in tasks {
        if t.done {
            continue;
        }
        if let (Some(start), Some(end)) = (t.fixed_start, t.fixed_end) {
            if end > win_start && start < win_end {
                blocks.push(FixedBlock {
                    start: start.max(win_start),
                    end: end.min(win_end),
                    label: t.title.clone(),
                    task_id: Some(t.id.clone()),
                });
            }
        }
    }

    let weekday = day.weekday().num_days_from_monday() as u8;
    for t in tasks {
        if t.done || !t.constant || !t.dow.contains(&weekday) {
            continue;
        }
        let (Some(start_hm), Some(end_hm)) = (
            t.constant_start.as_deref().and_then(parse_hm),
            t.constant_end.as_deref().and_then(parse_hm),
        ) else {
            continue;
        };
        let (Some(start), Some(end)) = (clock_on(day, start_hm), clock_on(day, end_hm)) else {
            continue;
        };
        // A skewed recurrence (end <= start) would produce a degenerate
        // block; skip it instead of propagating.
        if end > start && end > win_start && start < win_end {
            blocks.push(FixedBlock {
                start: start.max(win_start),
                end: end.min(win_end),
                label: t.title.clone(),
                task_id: Some(t.id.clone()),
            });
        }
    }

    blocks.sort_by_key(|b| b.start);
    let mut items = Vec::with_capacity(blocks.len());
    for block in blocks {
        items.push(PlanItem {
            start: block.start,
            end: block.end,
            label: block.label,
            task_id: block.task_id,
        });
        free.subtract(block.start, block.end);
    }
    (items, free)
}

/// Flexible tasks eligible for placement on `day`, in placement order.
///
/// Eligibility is judged against the configured end of day, not the
/// now-clipped window: a task whose deadline falls before the day's end
/// is left to overdue handling instead of being squeezed in.
pub(crate) fn eligible_flex<'a>(
    config: &PlannerConfig,
    day: DateTime<Utc>,
    now: DateTime<Utc>,
    tasks: &[&'a Task],
) -> Vec<&'a Task> {
    let Some(day_end) = parse_hm(&config.day_end).and_then(|hm| clock_on(day, hm)) else {
        return Vec::new();
    };
    let day_date = day.date_naive();
    let picked: Vec<&Task> = tasks
        .iter()
        .copied()
        .filter(|t| {
            !t.done
                && t.kind() == TemporalKind::Flexible
                && t.auto
                && t.status == TaskStatus::Active
                && t.deadline_at >= day_end
                && t.planned_for.map_or(true, |d| d <= day_date)
        })
        .collect();
    scoring::rank(&config.weights, now, picked)
}

/// Place as much of one flexible task as fits into the free set.
///
/// Chunk size is the configured cap for splittable extreme tasks, the
/// full remaining duration otherwise. Stops at the first chunk that does
/// not fit: a task is never squeezed into a too-small leftover, and the
/// remainder simply stays unplaced. Returns the minutes placed.
pub(crate) fn place_flexible(
    config: &PlannerConfig,
    free: &mut IntervalSet,
    items: &mut Vec<PlanItem>,
    task: &Task,
) -> i64 {
    let mut remaining = i64::from(task.duration_min);
    let chunk = if task.effort == Effort::Extreme && task.splittable {
        i64::from(config.chunk_cap_min)
    } else {
        remaining
    };
    let mut placed = 0;
    while remaining > 0 {
        let part = chunk.min(remaining);
        if part <= 0 {
            break;
        }
        let Some(slot) = free.first_fit(part) else {
            break;
        };
        let start = slot.start();
        let end = start + Duration::minutes(part);
        items.push(PlanItem {
            start,
            end,
            label: task.title.clone(),
            task_id: Some(task.id.clone()),
        });
        free.subtract(start, end);
        placed += part;
        remaining -= part;
    }
    placed
}

/// Plan one day: fixed blocks plus greedy placement of flexible tasks.
///
/// Returns the placed items sorted by start time and the `planned_for`
/// delta. The delta is applied to the board only when `persist` is true;
/// with `persist=false` the pass is a pure preview and repeated calls
/// produce identical plans.
pub fn plan_day(
    config: &PlannerConfig,
    day: DateTime<Utc>,
    now: DateTime<Utc>,
    board: &mut TaskBoard,
    persist: bool,
) -> DayPlan {
    let mut planned = Vec::new();
    let mut items = {
        let tasks: Vec<&Task> = board.active.values().collect();
        let (mut items, mut free) = build_fixed_blocks(config, day, now, &tasks);
        for task in eligible_flex(config, day, now, &tasks) {
            if place_flexible(config, &mut free, &mut items, task) > 0 {
                planned.push(PlannedFor {
                    task_id: task.id.clone(),
                    date: day.date_naive(),
                });
            }
        }
        items
    };

    if persist {
        for stamp in &planned {
            if let Some(task) = board.active.get_mut(&stamp.task_id) {
                task.planned_for = Some(stamp.date);
            }
        }
    }

    items.sort_by_key(|item| item.start);
    DayPlan { items, planned }
}
