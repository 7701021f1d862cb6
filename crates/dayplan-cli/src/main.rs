use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "dayplan-cli", version, about = "Dayplan CLI")]
struct Cli {
    /// Chat (tenant) whose task board the command operates on
    #[arg(long, global = true, default_value = "default")]
    chat: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Day and week plan views
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Overdue bucket management
    Overdue {
        #[command(subcommand)]
        action: commands::overdue::OverdueAction,
    },
    /// Completion history
    History,
    /// Move expired tasks to the overdue bucket
    Sweep,
    /// Morning digest: quote of the day plus today's plan
    Digest,
    /// Periodic sweep and deadline watchdog loop
    Watch {
        /// Seconds between ticks
        #[arg(long, default_value = "1800")]
        interval: u64,
    },
    /// Planner configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let chat = cli.chat;
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(&chat, action),
        Commands::Plan { action } => commands::plan::run(&chat, action),
        Commands::Overdue { action } => commands::overdue::run(&chat, action),
        Commands::History => commands::history::run(&chat),
        Commands::Sweep => commands::sweep::run(&chat),
        Commands::Digest => commands::digest::run(&chat),
        Commands::Watch { interval } => commands::watch::run(&chat, interval),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
