//! Task model and the per-tenant task board.
//!
//! A task is one of three temporal kinds: fixed (absolute start/end
//! pair), recurring (weekday set plus a time-of-day range), or flexible
//! (deadline plus duration, movable by the planner). Deadline expiry is
//! an explicit two-state machine:
//!
//!   ACTIVE ─────────> OVERDUE
//!            anchor < now
//!
//! The only legal transition is ACTIVE -> OVERDUE, guarded by the
//! anchor-time predicate in the sweeper. Returning an overdue task to the
//! board (with a fresh deadline) is a boundary operation that rebuilds
//! the record rather than a state transition. `done` and `auto` are
//! orthogonal flags, not states.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::ValidationError;

/// Effort class of a task, driving its placement score weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    Medium,
    Heavy,
    Extreme,
}

impl Effort {
    /// Score weight for this effort class.
    pub fn weight(&self) -> f64 {
        match self {
            Effort::Quick => 0.2,
            Effort::Medium => 0.5,
            Effort::Heavy => 0.8,
            Effort::Extreme => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Quick => "quick",
            Effort::Medium => "medium",
            Effort::Heavy => "heavy",
            Effort::Extreme => "extreme",
        }
    }
}

impl std::str::FromStr for Effort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(Effort::Quick),
            "medium" => Ok(Effort::Medium),
            "heavy" => Ok(Effort::Heavy),
            "extreme" => Ok(Effort::Extreme),
            other => Err(format!(
                "unknown effort '{other}' (expected quick|medium|heavy|extreme)"
            )),
        }
    }
}

impl Default for Effort {
    fn default() -> Self {
        Effort::Medium
    }
}

/// Deadline expiry status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Task is live and eligible for planning.
    Active,
    /// Anchor time has passed; task sits in the overdue bucket.
    Overdue,
}

impl TaskStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        matches!((self, to), (TaskStatus::Active, TaskStatus::Overdue))
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Active
    }
}

/// Attempted status transition that the state machine forbids.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid status transition: {from:?} -> {to:?}")]
pub struct TaskTransitionError {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Temporal kind derived from a task's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    /// Absolute start/end pair; placed as-is, never moved.
    Fixed,
    /// Weekly recurrence on a weekday set; never auto-placed, never swept.
    Recurring,
    /// Deadline plus duration; the planner decides where it goes.
    Flexible,
}

/// A unit of work or commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, unique per tenant
    pub id: String,
    /// Task title
    pub title: String,
    /// Duration in minutes
    pub duration_min: u32,
    /// Deadline timestamp (for fixed tasks, mirrors `fixed_end`)
    pub deadline_at: DateTime<Utc>,
    /// Effort class
    #[serde(default)]
    pub effort: Effort,
    /// Fixed start timestamp; requires `fixed_end`
    pub fixed_start: Option<DateTime<Utc>>,
    /// Fixed end timestamp; requires `fixed_start`
    pub fixed_end: Option<DateTime<Utc>>,
    /// Whether chunked placement is allowed
    #[serde(default)]
    pub splittable: bool,
    /// Completion flag (completed tasks stay on the board until deleted)
    #[serde(default)]
    pub done: bool,
    /// Opt-in to automatic placement
    #[serde(default)]
    pub auto: bool,
    /// Recurring flag
    #[serde(default)]
    pub constant: bool,
    /// Weekday indices for recurrence, 0=Monday .. 6=Sunday
    #[serde(default)]
    pub dow: Vec<u8>,
    /// Recurring start time-of-day, "HH:mm"
    pub constant_start: Option<String>,
    /// Recurring end time-of-day, "HH:mm"
    pub constant_end: Option<String>,
    /// Calendar date this task was last auto-placed on
    pub planned_for: Option<NaiveDate>,
    /// Deadline expiry status
    #[serde(default)]
    pub status: TaskStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new flexible task.
    pub fn new(title: impl Into<String>, duration_min: u32, deadline_at: DateTime<Utc>) -> Self {
        Task {
            id: short_id(),
            title: title.into(),
            duration_min,
            deadline_at,
            effort: Effort::Medium,
            fixed_start: None,
            fixed_end: None,
            splittable: false,
            done: false,
            auto: false,
            constant: false,
            dow: Vec::new(),
            constant_start: None,
            constant_end: None,
            planned_for: None,
            status: TaskStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Turn this task into a fixed-time commitment.
    ///
    /// The deadline mirrors the fixed end so the anchor and the stored
    /// deadline agree.
    pub fn fixed(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.fixed_start = Some(start);
        self.fixed_end = Some(end);
        self.deadline_at = end;
        self.duration_min = (end - start).num_minutes().max(0) as u32;
        self
    }

    /// Turn this task into a weekly recurring commitment.
    ///
    /// Recurring tasks are never auto-placed and never split. The
    /// duration is derived from the time-of-day range when it parses.
    pub fn recurring(
        mut self,
        dow: Vec<u8>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        if let (Some((sh, sm)), Some((eh, em))) = (parse_hm(&start), parse_hm(&end)) {
            let minutes = (i64::from(eh) * 60 + i64::from(em)) - (i64::from(sh) * 60 + i64::from(sm));
            self.duration_min = minutes.max(0) as u32;
        }
        self.constant = true;
        self.dow = dow;
        self.constant_start = Some(start);
        self.constant_end = Some(end);
        self.auto = false;
        self.splittable = false;
        self
    }

    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    pub fn with_splittable(mut self, splittable: bool) -> Self {
        self.splittable = splittable;
        self
    }

    /// Temporal kind derived from the fixed pair and the recurring flag.
    pub fn kind(&self) -> TemporalKind {
        if self.fixed_start.is_some() && self.fixed_end.is_some() {
            TemporalKind::Fixed
        } else if self.constant {
            TemporalKind::Recurring
        } else {
            TemporalKind::Flexible
        }
    }

    /// The deadline used for overdue and watchdog checks: the fixed end
    /// if present, else the deadline.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.fixed_end.unwrap_or(self.deadline_at)
    }

    /// Transition to a new status.
    pub fn transition_to(&mut self, to: TaskStatus) -> Result<(), TaskTransitionError> {
        if !self.status.can_transition_to(&to) {
            return Err(TaskTransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Boundary validation. A record that fails here never reaches the
    /// engine; the engine does not re-validate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fixed_start.is_some() != self.fixed_end.is_some() {
            return Err(ValidationError::IncompleteFixedPair);
        }
        if let (Some(start), Some(end)) = (self.fixed_start, self.fixed_end) {
            if end <= start {
                return Err(ValidationError::InvertedFixedRange { start, end });
            }
            if self.constant {
                return Err(ValidationError::InconsistentKind(
                    "task carries both a fixed pair and a recurrence".into(),
                ));
            }
        }
        if self.constant {
            if self.dow.is_empty() {
                return Err(ValidationError::EmptyWeekdaySet);
            }
            if let Some(&bad) = self.dow.iter().find(|&&d| d > 6) {
                return Err(ValidationError::InvalidWeekday(bad));
            }
            for time in [&self.constant_start, &self.constant_end] {
                match time {
                    Some(s) if parse_hm(s).is_some() => {}
                    Some(s) => return Err(ValidationError::InvalidClockTime(s.clone())),
                    None => {
                        return Err(ValidationError::InconsistentKind(
                            "recurring task requires a start and end time-of-day".into(),
                        ))
                    }
                }
            }
        }
        Ok(())
    }
}

/// An immutable record of a completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoneEntry {
    pub task: Task,
    pub completed_at: DateTime<Utc>,
}

/// Per-tenant task collection: active tasks, the overdue bucket, and the
/// append-only completion history.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub active: BTreeMap<String, Task>,
    pub overdue: BTreeMap<String, Task>,
    pub history: Vec<DoneEntry>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task to the active collection.
    pub fn insert(&mut self, task: Task) {
        self.active.insert(task.id.clone(), task);
    }

    /// Look a task up in the active collection, then the overdue bucket.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.active.get(id).or_else(|| self.overdue.get(id))
    }

    /// Remove a task from whichever collection holds it.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        self.active.remove(id).or_else(|| self.overdue.remove(id))
    }

    /// Toggle an active task's done flag.
    ///
    /// Completion appends a snapshot to the history; un-doing does not
    /// rewrite history (it is append-only). Returns the new flag value.
    pub fn toggle_done(&mut self, id: &str, now: DateTime<Utc>) -> Option<bool> {
        let task = self.active.get_mut(id)?;
        if task.done {
            task.done = false;
            return Some(false);
        }
        task.done = true;
        let snapshot = task.clone();
        self.history.push(DoneEntry {
            task: snapshot,
            completed_at: now,
        });
        Some(true)
    }

    /// Complete a task straight out of the overdue bucket.
    pub fn complete_overdue(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        match self.overdue.remove(id) {
            Some(mut task) => {
                task.done = true;
                self.history.push(DoneEntry {
                    task,
                    completed_at: now,
                });
                true
            }
            None => false,
        }
    }

    /// Flip an active task's auto-placement flag. Returns the new value.
    pub fn toggle_auto(&mut self, id: &str) -> Option<bool> {
        let task = self.active.get_mut(id)?;
        task.auto = !task.auto;
        Some(task.auto)
    }

    /// Give an overdue task a fresh deadline and return it to the active
    /// collection. The `planned_for` stamp is cleared so the planner
    /// treats it as new work.
    pub fn reschedule_overdue(&mut self, id: &str, deadline_at: DateTime<Utc>) -> bool {
        match self.overdue.remove(id) {
            Some(mut task) => {
                task.status = TaskStatus::Active;
                task.deadline_at = deadline_at;
                task.planned_for = None;
                self.active.insert(task.id.clone(), task);
                true
            }
            None => false,
        }
    }

    /// Create a new flexible task prefilled from an existing one.
    pub fn duplicate(&self, id: &str) -> Option<Task> {
        let src = self.get(id)?;
        let mut task = Task::new(src.title.clone(), src.duration_min, src.deadline_at);
        task.effort = src.effort;
        task.splittable = src.splittable;
        task.auto = true;
        Some(task)
    }
}

/// Parse an "HH:mm" clock time.
pub(crate) fn parse_hm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 30, 18, 0, 0).unwrap()
    }

    #[test]
    fn temporal_kind_is_exclusive() {
        let flex = Task::new("write report", 90, deadline());
        assert_eq!(flex.kind(), TemporalKind::Flexible);

        let fixed = Task::new("dentist", 0, deadline()).fixed(
            Utc.with_ymd_and_hms(2025, 10, 30, 16, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 10, 30, 17, 30, 0).unwrap(),
        );
        assert_eq!(fixed.kind(), TemporalKind::Fixed);
        assert_eq!(fixed.duration_min, 90);
        assert_eq!(fixed.anchor(), fixed.fixed_end.unwrap());

        let recurring = Task::new("gym", 60, deadline()).recurring(vec![0, 2, 4], "18:00", "19:00");
        assert_eq!(recurring.kind(), TemporalKind::Recurring);
        assert!(!recurring.auto);
        assert!(!recurring.splittable);
    }

    #[test]
    fn status_machine_allows_only_active_to_overdue() {
        let mut task = Task::new("essay", 120, deadline());
        assert!(task.transition_to(TaskStatus::Overdue).is_ok());
        assert_eq!(task.status, TaskStatus::Overdue);
        assert!(task.transition_to(TaskStatus::Overdue).is_err());
        assert!(task.transition_to(TaskStatus::Active).is_err());
    }

    #[test]
    fn validate_rejects_malformed_records() {
        let mut half_fixed = Task::new("x", 30, deadline());
        half_fixed.fixed_start = Some(deadline());
        assert!(matches!(
            half_fixed.validate(),
            Err(ValidationError::IncompleteFixedPair)
        ));

        let inverted = Task::new("x", 30, deadline()).fixed(deadline(), deadline());
        assert!(matches!(
            inverted.validate(),
            Err(ValidationError::InvertedFixedRange { .. })
        ));

        let mut both = Task::new("x", 30, deadline()).recurring(vec![0], "09:00", "10:00");
        both.fixed_start = Some(deadline() - chrono::Duration::hours(2));
        both.fixed_end = Some(deadline());
        assert!(matches!(
            both.validate(),
            Err(ValidationError::InconsistentKind(_))
        ));

        let no_days = Task::new("x", 30, deadline()).recurring(vec![], "09:00", "10:00");
        assert!(matches!(
            no_days.validate(),
            Err(ValidationError::EmptyWeekdaySet)
        ));

        let bad_day = Task::new("x", 30, deadline()).recurring(vec![7], "09:00", "10:00");
        assert!(matches!(
            bad_day.validate(),
            Err(ValidationError::InvalidWeekday(7))
        ));

        let bad_time = Task::new("x", 30, deadline()).recurring(vec![0], "24:00", "10:00");
        assert!(matches!(
            bad_time.validate(),
            Err(ValidationError::InvalidClockTime(_))
        ));

        assert!(Task::new("ok", 30, deadline()).validate().is_ok());
    }

    #[test]
    fn board_done_toggle_appends_history_once() {
        let mut board = TaskBoard::new();
        let task = Task::new("essay", 120, deadline());
        let id = task.id.clone();
        board.insert(task);

        let now = Utc::now();
        assert_eq!(board.toggle_done(&id, now), Some(true));
        assert_eq!(board.history.len(), 1);
        assert_eq!(board.toggle_done(&id, now), Some(false));
        // History is append-only; un-doing leaves the record.
        assert_eq!(board.history.len(), 1);
    }

    #[test]
    fn reschedule_returns_overdue_task_to_active() {
        let mut board = TaskBoard::new();
        let mut task = Task::new("late essay", 120, deadline());
        task.status = TaskStatus::Overdue;
        task.planned_for = Some(NaiveDate::from_ymd_opt(2025, 10, 29).unwrap());
        let id = task.id.clone();
        board.overdue.insert(id.clone(), task);

        let new_deadline = deadline() + chrono::Duration::days(3);
        assert!(board.reschedule_overdue(&id, new_deadline));
        let task = board.active.get(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.deadline_at, new_deadline);
        assert!(task.planned_for.is_none());
    }

    #[test]
    fn parse_hm_bounds() {
        assert_eq!(parse_hm("06:00"), Some((6, 0)));
        assert_eq!(parse_hm("23:59"), Some((23, 59)));
        assert_eq!(parse_hm("24:00"), None);
        assert_eq!(parse_hm("09:60"), None);
        assert_eq!(parse_hm("0900"), None);
        assert_eq!(parse_hm("nine"), None);
    }
}
