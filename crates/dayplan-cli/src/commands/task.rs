//! Task management commands for CLI.

use clap::Subcommand;
use dayplan_core::{Effort, Task, TaskDb, TaskStore};

use crate::common::{format_task_line, parse_datetime};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a flexible task
    Add {
        /// Task title
        title: String,
        /// Deadline, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        deadline: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Effort class: quick|medium|heavy|extreme
        #[arg(long, default_value = "medium")]
        effort: String,
        /// Allow chunked placement
        #[arg(long)]
        splittable: bool,
        /// Opt in to automatic placement
        #[arg(long)]
        auto: bool,
    },
    /// Add a fixed-time task
    AddFixed {
        /// Task title
        title: String,
        /// Start, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        start: String,
        /// End, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        end: String,
        /// Effort class: quick|medium|heavy|extreme
        #[arg(long, default_value = "medium")]
        effort: String,
    },
    /// Add a weekly recurring task
    AddRecurring {
        /// Task title
        title: String,
        /// Comma-separated weekday indices, 0=Monday..6=Sunday
        #[arg(long)]
        days: String,
        /// Start time-of-day, HH:mm
        #[arg(long)]
        start: String,
        /// End time-of-day, HH:mm
        #[arg(long)]
        end: String,
        /// Effort class: quick|medium|heavy|extreme
        #[arg(long, default_value = "medium")]
        effort: String,
    },
    /// List tasks on the board
    List {
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's done flag
    Done {
        /// Task ID
        id: String,
    },
    /// Toggle a task's auto-placement flag
    Auto {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Del {
        /// Task ID
        id: String,
    },
    /// Create a new flexible task prefilled from an existing one
    Dup {
        /// Task ID to copy from
        id: String,
    },
}

pub fn run(chat: &str, action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = TaskDb::open()?;
    let mut board = db.load(chat)?;
    let now = chrono::Utc::now();

    match action {
        TaskAction::Add {
            title,
            deadline,
            duration,
            effort,
            splittable,
            auto,
        } => {
            let task = Task::new(title, duration, parse_datetime(&deadline)?)
                .with_effort(effort.parse::<Effort>()?)
                .with_splittable(splittable)
                .with_auto(auto);
            task.validate()?;
            println!("Task added: [{}] {}", task.id, task.title);
            board.insert(task);
        }
        TaskAction::AddFixed {
            title,
            start,
            end,
            effort,
        } => {
            let task = Task::new(title, 0, parse_datetime(&end)?)
                .fixed(parse_datetime(&start)?, parse_datetime(&end)?)
                .with_effort(effort.parse::<Effort>()?);
            task.validate()?;
            println!("Task added: [{}] {}", task.id, task.title);
            board.insert(task);
        }
        TaskAction::AddRecurring {
            title,
            days,
            start,
            end,
            effort,
        } => {
            let dow = days
                .split(',')
                .map(|d| d.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| format!("invalid weekday list '{days}'"))?;
            let task = Task::new(title, 0, now)
                .recurring(dow, start, end)
                .with_effort(effort.parse::<Effort>()?);
            task.validate()?;
            println!("Task added: [{}] {}", task.id, task.title);
            board.insert(task);
        }
        TaskAction::List { json } => {
            let tasks: Vec<&Task> = board.active.values().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("The board is empty.");
            } else {
                for task in tasks {
                    println!("{}", format_task_line(task, now));
                }
            }
        }
        TaskAction::Done { id } => match board.toggle_done(&id, now) {
            Some(true) => println!("Task completed: {id}"),
            Some(false) => println!("Task reopened: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Auto { id } => match board.toggle_auto(&id) {
            Some(true) => println!("Auto-placement enabled: {id}"),
            Some(false) => println!("Auto-placement disabled: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Del { id } => match board.remove(&id) {
            Some(task) => println!("Task deleted: [{}] {}", task.id, task.title),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Dup { id } => match board.duplicate(&id) {
            Some(task) => {
                println!("Task added: [{}] {} (copy of {id})", task.id, task.title);
                board.insert(task);
            }
            None => println!("Task not found: {id}"),
        },
    }

    db.save(chat, &board)?;
    Ok(())
}
