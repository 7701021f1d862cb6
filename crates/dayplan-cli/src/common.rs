//! Shared CLI helpers: datetime parsing and plan/task text rendering.

use chrono::{DateTime, NaiveDateTime, Utc};
use dayplan_core::{PlanItem, Task, TemporalKind};

/// Parse "YYYY-MM-DD HH:MM" into a UTC timestamp.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map(|dt| dt.and_utc())
        .map_err(|_| format!("invalid datetime '{s}', expected YYYY-MM-DD HH:MM"))
}

/// Render one day's plan as `HH:MM-HH:MM | label` lines.
pub fn format_plan(items: &[PlanItem]) -> String {
    if items.is_empty() {
        return "No tasks for the selected day.".to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                "{}-{} | {}",
                item.start.format("%H:%M"),
                item.end.format("%H:%M"),
                item.label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "HH:MM" left until `to`, clamped at zero.
pub fn time_left(now: DateTime<Utc>, to: DateTime<Utc>) -> String {
    if to <= now {
        return "00:00".to_string();
    }
    let minutes = (to - now).num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// One listing line per task: flags, id, time left, effort, kind.
pub fn format_task_line(task: &Task, now: DateTime<Utc>) -> String {
    let flag = if task.done {
        "[x]"
    } else if task.auto {
        "[a]"
    } else {
        "[ ]"
    };
    let (left, kind) = match task.kind() {
        TemporalKind::Recurring => ("--".to_string(), "recurring"),
        TemporalKind::Fixed => (time_left(now, task.anchor()), "fixed"),
        TemporalKind::Flexible => (time_left(now, task.anchor()), "flexible"),
    };
    format!(
        "{flag} [{}] {} -- due in {left}; {}; {} min; {kind}",
        task.id,
        task.title,
        task.effort.as_str(),
        task.duration_min
    )
}
