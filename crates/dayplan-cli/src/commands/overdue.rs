//! Overdue bucket management.
//!
//! Recovery paths for expired tasks: a fresh deadline (back to the
//! board), completion (into history), or deletion. These are boundary
//! transitions; the engine's state machine only ever moves tasks the
//! other way.

use clap::Subcommand;
use dayplan_core::{TaskDb, TaskStore};

use crate::common::parse_datetime;

#[derive(Subcommand)]
pub enum OverdueAction {
    /// List overdue tasks
    List,
    /// Set a new deadline and return the task to the board
    Deadline {
        /// Task ID
        id: String,
        /// New deadline, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        to: String,
    },
    /// Mark an overdue task done
    Done {
        /// Task ID
        id: String,
    },
    /// Delete an overdue task
    Del {
        /// Task ID
        id: String,
    },
}

pub fn run(chat: &str, action: OverdueAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;

    match action {
        OverdueAction::List => {
            if board.overdue.is_empty() {
                println!("No overdue tasks.");
            } else {
                println!("Overdue tasks:");
                for task in board.overdue.values() {
                    println!(
                        "[{}] {} -- was due {}",
                        task.id,
                        task.title,
                        task.anchor().format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        OverdueAction::Deadline { id, to } => {
            let deadline = parse_datetime(&to)?;
            if board.reschedule_overdue(&id, deadline) {
                println!("New deadline set: {}", deadline.format("%Y-%m-%d %H:%M"));
            } else {
                println!("Task not found in the overdue bucket: {id}");
            }
        }
        OverdueAction::Done { id } => {
            if board.complete_overdue(&id, chrono::Utc::now()) {
                println!("Task completed: {id}");
            } else {
                println!("Task not found in the overdue bucket: {id}");
            }
        }
        OverdueAction::Del { id } => {
            if board.overdue.remove(&id).is_some() {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found in the overdue bucket: {id}");
            }
        }
    }

    db.save(chat, &board)?;
    Ok(())
}
