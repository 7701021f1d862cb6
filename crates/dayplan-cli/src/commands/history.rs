//! Completion history view.

use dayplan_core::{TaskDb, TaskStore};

/// Most recent entries first, capped at 50 like the chat view.
const HISTORY_CAP: usize = 50;

pub fn run(chat: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let board = db.load(chat)?;

    if board.history.is_empty() {
        println!("History is empty.");
        return Ok(());
    }

    println!("Completed tasks:");
    for entry in board.history.iter().rev().take(HISTORY_CAP) {
        println!(
            "[x] [{}] {} -- completed {}",
            entry.task.id,
            entry.task.title,
            entry.completed_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
