//! Planner configuration management.

use clap::Subcommand;
use dayplan_core::PlannerConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current planner configuration
    Show,
    /// Write the default configuration file
    Init,
    /// Validate the configuration file
    Check,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = PlannerConfig::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            PlannerConfig::default().save()?;
            println!("default configuration written");
        }
        ConfigAction::Check => {
            let config = PlannerConfig::load()?;
            config.validate()?;
            println!("configuration ok");
        }
    }
    Ok(())
}
