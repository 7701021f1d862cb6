//! One-shot overdue sweep.

use dayplan_core::{sweep_overdue, TaskDb, TaskStore};

pub fn run(chat: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;

    let events = sweep_overdue(chrono::Utc::now(), &mut board);
    if events.is_empty() {
        println!("Nothing to sweep.");
    } else {
        for event in &events {
            println!("{}", event.message());
        }
        db.save(chat, &board)?;
    }
    Ok(())
}
