//! Periodic sweep and deadline watchdog loop.
//!
//! The engine is stateless about alerts already sent, so every tick
//! re-emits threshold alerts for tasks still inside a window; this loop
//! is the external scheduler the engine expects.

use std::time::Duration;

use dayplan_core::{deadline_alerts, sweep_overdue, TaskDb, TaskStore};

pub fn run(chat: &str, interval_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch_loop(chat, interval_secs))
}

async fn watch_loop(chat: &str, interval_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;
        if let Err(e) = tick(chat) {
            eprintln!("error: {e}");
        }
    }
}

fn tick(chat: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;
    let now = chrono::Utc::now();

    let moved = sweep_overdue(now, &mut board);
    if !moved.is_empty() {
        db.save(chat, &board)?;
    }
    let alerts = deadline_alerts(now, &board);
    for event in moved.iter().chain(alerts.iter()) {
        println!("{}", event.message());
    }
    Ok(())
}
