//! Day and week plan views.
//!
//! Both views sweep the overdue bucket first so expired work never shows
//! up in a placed schedule, then print the resulting notifications.

use clap::Subcommand;
use dayplan_core::{plan_day, plan_week, sweep_overdue, TaskDb, TaskStore};

use crate::common::format_plan;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Today's plan
    Today {
        /// Compute without stamping planned_for
        #[arg(long)]
        no_persist: bool,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// 7-day overview (each task committed to at most one day)
    Week {
        /// Write the week's planned_for stamps back to the store
        #[arg(long)]
        persist: bool,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

pub fn run(chat: &str, action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = dayplan_core::PlannerConfig::load_or_default();
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;
    let now = chrono::Utc::now();

    for event in sweep_overdue(now, &mut board) {
        println!("{}", event.message());
    }

    match action {
        PlanAction::Today { no_persist, json } => {
            let plan = plan_day(&config, now, now, &mut board, !no_persist);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("Plan for today:");
                println!("{}", format_plan(&plan.items));
            }
        }
        PlanAction::Week { persist, json } => {
            let week = plan_week(&config, now, &board);
            if persist {
                for stamp in &week.planned {
                    if let Some(task) = board.active.get_mut(&stamp.task_id) {
                        task.planned_for = Some(stamp.date);
                    }
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&week)?);
            } else {
                println!("Week overview:");
                for day in &week.days {
                    println!("-- {} --", day.label);
                    println!("{}", format_plan(&day.items));
                }
            }
        }
    }

    db.save(chat, &board)?;
    Ok(())
}
