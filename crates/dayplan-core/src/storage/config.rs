//! TOML-based planner configuration.
//!
//! Everything the engine treats as a named constant lives here so tests
//! and deployments can reshape the day without touching code:
//! - daily window bounds (clock times)
//! - meal block definitions
//! - score weights (alpha/beta)
//! - the chunk cap for splittable extreme tasks
//!
//! Configuration is stored at `~/.config/dayplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::scoring::ScoreWeights;
use crate::task::parse_hm;

/// A fixed meal block at a configured clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealBlock {
    pub label: String,
    /// HH:mm
    pub start: String,
    pub duration_min: u32,
}

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/dayplan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Start of the daily operating window, HH:mm
    #[serde(default = "default_day_start")]
    pub day_start: String,
    /// End of the daily operating window, HH:mm
    #[serde(default = "default_day_end")]
    pub day_end: String,
    /// Fixed meal blocks carved out of every day
    #[serde(default = "default_meals")]
    pub meals: Vec<MealBlock>,
    /// Placement score weights
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Chunk cap in minutes for splittable extreme tasks
    #[serde(default = "default_chunk_cap")]
    pub chunk_cap_min: u32,
}

fn default_day_start() -> String {
    "06:00".to_string()
}

fn default_day_end() -> String {
    "22:00".to_string()
}

fn default_chunk_cap() -> u32 {
    120
}

fn default_meals() -> Vec<MealBlock> {
    vec![
        MealBlock {
            label: "Breakfast".to_string(),
            start: "08:00".to_string(),
            duration_min: 30,
        },
        MealBlock {
            label: "Lunch".to_string(),
            start: "13:00".to_string(),
            duration_min: 45,
        },
        MealBlock {
            label: "Dinner".to_string(),
            start: "19:00".to_string(),
            duration_min: 45,
        },
    ]
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            meals: default_meals(),
            weights: ScoreWeights::default(),
            chunk_cap_min: default_chunk_cap(),
        }
    }
}

impl PlannerConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dayplan"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults first if no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, fails
    /// validation, or the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config: PlannerConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                config.validate()?;
                Ok(config)
            }
            Err(_) => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    /// Load from disk or fall back to the defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Check every clock time and the chunk cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("day_start", &self.day_start), ("day_end", &self.day_end)] {
            if parse_hm(value).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("'{value}' is not a valid HH:mm clock time"),
                });
            }
        }
        for meal in &self.meals {
            if parse_hm(&meal.start).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: format!("meals.{}", meal.label),
                    message: format!("'{}' is not a valid HH:mm clock time", meal.start),
                });
            }
        }
        if self.chunk_cap_min == 0 {
            return Err(ConfigError::InvalidValue {
                key: "chunk_cap_min".to_string(),
                message: "chunk cap must be at least one minute".to_string(),
            });
        }
        Ok(())
    }
}
