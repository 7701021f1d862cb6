//! Overdue sweeping and deadline threshold alerts.
//!
//! The sweeper drives the only legal status transition
//! (Active -> Overdue) and must run before any planning pass so overdue
//! tasks never appear in a placed schedule. The watchdog is a stateless
//! threshold scan; repeated ticks re-emit alerts and rate limiting is
//! the caller's concern.

use chrono::{DateTime, Duration, Utc};

use crate::events::Event;
use crate::task::{TaskBoard, TaskStatus, TemporalKind};

/// Move every active task whose anchor has passed into the overdue
/// bucket, emitting one event per transition.
///
/// Recurring tasks have no terminal deadline and are excluded entirely.
/// Idempotent: a task already in the bucket is never re-notified.
pub fn sweep_overdue(now: DateTime<Utc>, board: &mut TaskBoard) -> Vec<Event> {
    let expired: Vec<String> = board
        .active
        .values()
        .filter(|t| !t.done && t.kind() != TemporalKind::Recurring)
        .filter(|t| t.status == TaskStatus::Active && t.anchor() < now)
        .map(|t| t.id.clone())
        .collect();

    let mut events = Vec::with_capacity(expired.len());
    for id in expired {
        let Some(mut task) = board.active.remove(&id) else {
            continue;
        };
        if task.transition_to(TaskStatus::Overdue).is_err() {
            board.active.insert(id, task);
            continue;
        }
        events.push(Event::TaskOverdue {
            task_id: task.id.clone(),
            title: task.title.clone(),
            anchor: task.anchor(),
            at: now,
        });
        board.overdue.insert(task.id.clone(), task);
    }
    events
}

/// Threshold alerts for active, non-recurring tasks.
///
/// Both checks are independent: an anchor within 4 hours yields the
/// approaching alert and the urgent one in the same pass.
pub fn deadline_alerts(now: DateTime<Utc>, board: &TaskBoard) -> Vec<Event> {
    let mut events = Vec::new();
    for task in board.active.values() {
        if task.done || task.kind() == TemporalKind::Recurring {
            continue;
        }
        let left = task.anchor() - now;
        if left > Duration::zero() && left <= Duration::hours(24) {
            events.push(Event::DeadlineApproaching {
                task_id: task.id.clone(),
                title: task.title.clone(),
                anchor: task.anchor(),
                at: now,
            });
        }
        if left > Duration::zero() && left <= Duration::hours(4) {
            events.push(Event::DeadlineUrgent {
                task_id: task.id.clone(),
                title: task.title.clone(),
                anchor: task.anchor(),
                at: now,
            });
        }
    }
    events
}
