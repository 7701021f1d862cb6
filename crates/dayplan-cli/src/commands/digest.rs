//! Morning digest: a stoic quote plus today's plan.
//!
//! Quotes are read from `quotes.json` in the data directory (UTF-8,
//! `[{"q": "...", "a": "..."}]`); a built-in line covers a missing or
//! empty file.

use dayplan_core::{plan_day, sweep_overdue, PlannerConfig, TaskDb, TaskStore};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::common::format_plan;

const FALLBACK_QUOTE: &str =
    "\"The happiness of your life depends upon the quality of your thoughts.\" -- Marcus Aurelius";

#[derive(Deserialize)]
struct Quote {
    #[serde(default)]
    q: String,
    #[serde(default)]
    a: String,
}

fn quote_of_the_day() -> String {
    let Ok(dir) = dayplan_core::storage::data_dir() else {
        return FALLBACK_QUOTE.to_string();
    };
    let quotes: Vec<Quote> = std::fs::read_to_string(dir.join("quotes.json"))
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default();
    quotes
        .choose(&mut rand::thread_rng())
        .filter(|quote| !quote.q.trim().is_empty())
        .map(|quote| {
            let author = if quote.a.trim().is_empty() {
                "Stoic"
            } else {
                quote.a.trim()
            };
            format!("\"{}\" -- {}", quote.q.trim(), author)
        })
        .unwrap_or_else(|| FALLBACK_QUOTE.to_string())
}

pub fn run(chat: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = PlannerConfig::load_or_default();
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;
    let now = chrono::Utc::now();

    for event in sweep_overdue(now, &mut board) {
        println!("{}", event.message());
    }
    let plan = plan_day(&config, now, now, &mut board, true);
    db.save(chat, &board)?;

    println!("{}", quote_of_the_day());
    println!();
    println!("Plan for today:");
    println!("{}", format_plan(&plan.items));
    Ok(())
}
