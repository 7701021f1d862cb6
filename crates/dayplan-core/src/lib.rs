//! # Dayplan Core Library
//!
//! This library provides the scheduling engine for Dayplan, a per-chat
//! day planner. The engine is pure per invocation: every planning or
//! sweep call takes the current time plus a task board and returns placed
//! intervals, notification events, and a small mutation set for the
//! caller to persist. All I/O lives in the storage layer and in the CLI.
//!
//! ## Architecture
//!
//! - **Interval algebra**: ordered, disjoint half-open free-time ranges
//!   with subtraction and first-fit queries
//! - **Day planner**: operating-window computation, fixed-block
//!   placement, greedy score-ordered placement of flexible tasks
//! - **Week planner**: 7-day horizon with a one-day-only assignment rule
//! - **Alerts**: overdue sweeping (Active -> Overdue) and deadline
//!   threshold watchdog
//! - **Storage**: SQLite-backed per-tenant task store and TOML-based
//!   planner configuration
//!
//! ## Key Components
//!
//! - [`Task`] / [`TaskBoard`]: the per-tenant task collection
//! - [`plan_day`] / [`plan_week`]: the placement entry points
//! - [`sweep_overdue`] / [`deadline_alerts`]: the deadline state machine
//! - [`TaskDb`]: per-tenant persistence
//! - [`PlannerConfig`]: window bounds, meal blocks, score weights

pub mod alerts;
pub mod error;
pub mod events;
pub mod interval;
pub mod planner;
pub mod scoring;
pub mod storage;
pub mod task;

pub use alerts::{deadline_alerts, sweep_overdue};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use interval::{Interval, IntervalSet};
pub use planner::week::{plan_week, WeekDay, WeekPlan};
pub use planner::{plan_day, DayPlan, PlanItem, PlannedFor};
pub use scoring::ScoreWeights;
pub use storage::{PlannerConfig, TaskDb, TaskStore};
pub use task::{DoneEntry, Effort, Task, TaskBoard, TaskStatus, TemporalKind};
