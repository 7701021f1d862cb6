pub mod config;
pub mod digest;
pub mod history;
pub mod overdue;
pub mod plan;
pub mod sweep;
pub mod task;
pub mod watch;
