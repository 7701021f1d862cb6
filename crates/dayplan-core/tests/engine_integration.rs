//! Integration tests for the full engine flow over a real task database:
//! sweep, plan the day, persist stamps, reload, plan the week, and run
//! the watchdog.

use chrono::{Duration, TimeZone, Utc};
use dayplan_core::{
    deadline_alerts, plan_day, plan_week, sweep_overdue, Effort, Event, PlannerConfig, Task,
    TaskBoard, TaskDb, TaskStore,
};

fn monday_morning() -> chrono::DateTime<Utc> {
    // 2025-10-06 is a Monday.
    Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap()
}

fn seed_board(now: chrono::DateTime<Utc>) -> TaskBoard {
    let mut board = TaskBoard::new();
    board.insert(Task::new("late essay", 60, now - Duration::hours(4)).with_auto(true));
    board.insert(
        Task::new("write report", 90, now + Duration::days(1))
            .with_auto(true)
            .with_effort(Effort::Heavy),
    );
    board.insert(
        Task::new("standup", 0, now).fixed(now + Duration::hours(1), now + Duration::hours(2)),
    );
    board.insert(
        Task::new("gym", 60, now + Duration::days(30)).recurring(vec![0], "18:00", "19:00"),
    );
    board
}

#[test]
fn digest_flow_over_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = TaskDb::open_at(&dir.path().join("dayplan.db")).unwrap();

    let now = monday_morning();
    let config = PlannerConfig::default();
    db.save("chat-1", &seed_board(now)).unwrap();

    // Sweep before planning: the stale task leaves the active board.
    let mut board = db.load("chat-1").unwrap();
    let events = sweep_overdue(now, &mut board);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::TaskOverdue { title, .. } if title == "late essay"));
    assert_eq!(board.overdue.len(), 1);

    let plan = plan_day(&config, now, now, &mut board, true);
    let labels: Vec<&str> = plan.items.iter().map(|i| i.label.as_str()).collect();
    assert!(!labels.contains(&"late essay"));
    assert!(labels.contains(&"standup"));
    assert!(labels.contains(&"gym"));
    assert!(labels.contains(&"write report"));
    assert!(labels.contains(&"Lunch"));
    assert_eq!(plan.planned.len(), 1);

    // Items come back ordered and non-overlapping apart from the
    // documented fixed-block policy (none overlap in this board).
    for pair in plan.items.windows(2) {
        assert!(pair[0].start <= pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }

    // Stamps survive the store round trip.
    db.save("chat-1", &board).unwrap();
    let board = db.load("chat-1").unwrap();
    let report = board
        .active
        .values()
        .find(|t| t.title == "write report")
        .unwrap();
    assert_eq!(report.planned_for, Some(now.date_naive()));

    // Week view: no duplicates, and the caller's board stays untouched.
    let week = plan_week(&config, now, &board);
    assert_eq!(week.days.len(), 7);
    let days_with_report = week
        .days
        .iter()
        .filter(|d| d.items.iter().any(|i| i.task_id.as_deref() == Some(report.id.as_str())))
        .count();
    assert_eq!(days_with_report, 1);
    // Gym recurs on Mondays; the horizon starting today holds one.
    let days_with_gym = week
        .days
        .iter()
        .filter(|d| d.items.iter().any(|i| i.label == "gym"))
        .count();
    assert_eq!(days_with_gym, 1);

    // Watchdog: the report is 24h out (approaching), the standup ends in
    // two hours (approaching + urgent), the gym never alerts.
    let alerts = deadline_alerts(now, &board);
    let approaching = alerts
        .iter()
        .filter(|e| matches!(e, Event::DeadlineApproaching { .. }))
        .count();
    let urgent = alerts
        .iter()
        .filter(|e| matches!(e, Event::DeadlineUrgent { .. }))
        .count();
    assert_eq!(approaching, 2);
    assert_eq!(urgent, 1);
}

#[test]
fn sweep_then_plan_skips_overdue_work() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = TaskDb::open_at(&dir.path().join("dayplan.db")).unwrap();
    let now = monday_morning();
    let config = PlannerConfig::default();

    let mut board = TaskBoard::new();
    board.insert(Task::new("expired", 45, now - Duration::minutes(5)).with_auto(true));
    db.save("chat-2", &board).unwrap();

    let mut board = db.load("chat-2").unwrap();
    let moved = sweep_overdue(now, &mut board);
    assert_eq!(moved.len(), 1);
    db.save("chat-2", &board).unwrap();

    let mut board = db.load("chat-2").unwrap();
    let plan = plan_day(&config, now, now, &mut board, true);
    assert!(plan.items.iter().all(|i| i.label != "expired"));
    assert!(plan.planned.is_empty());

    // Sweeping again after the round trip stays a no-op.
    assert!(sweep_overdue(now, &mut board).is_empty());
}

#[test]
fn week_stamps_apply_through_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = TaskDb::open_at(&dir.path().join("dayplan.db")).unwrap();
    let now = monday_morning();
    let config = PlannerConfig::default();

    let mut board = TaskBoard::new();
    board.insert(Task::new("memo", 45, now + Duration::days(5)).with_auto(true));
    db.save("chat-3", &board).unwrap();

    let mut board = db.load("chat-3").unwrap();
    let week = plan_week(&config, now, &board);
    assert_eq!(week.planned.len(), 1);
    // The engine returned a delta without touching the board; the caller
    // applies and persists it.
    assert!(board.active.values().all(|t| t.planned_for.is_none()));
    for stamp in &week.planned {
        if let Some(task) = board.active.get_mut(&stamp.task_id) {
            task.planned_for = Some(stamp.date);
        }
    }
    db.save("chat-3", &board).unwrap();

    let board = db.load("chat-3").unwrap();
    let memo = board.active.values().find(|t| t.title == "memo").unwrap();
    assert_eq!(memo.planned_for, Some(week.planned[0].date));
}
