//! Core error types for dayplan-core.
//!
//! Scheduling infeasibility is never an error: an empty day window or an
//! unplaceable chunk yields an empty or partial result. Errors exist only
//! at the boundaries -- malformed task records, storage failures, and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the task database
    #[error("Failed to open task database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDirUnavailable(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored task record could not be decoded
    #[error("Corrupt task record for tenant '{tenant}': {message}")]
    CorruptRecord { tenant: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Task validation errors, raised at the boundary before a record reaches
/// the engine. The engine itself trusts its input contract.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Fixed start/end are mutually required
    #[error("Fixed task must carry both start and end timestamps")]
    IncompleteFixedPair,

    /// Fixed end precedes fixed start
    #[error("Invalid fixed range: end ({end}) must be greater than start ({start})")]
    InvertedFixedRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// A task cannot be both fixed-time and recurring
    #[error("Inconsistent temporal kind: {0}")]
    InconsistentKind(String),

    /// Recurring task without any weekday
    #[error("Recurring task must select at least one weekday")]
    EmptyWeekdaySet,

    /// Weekday index outside 0..=6
    #[error("Invalid weekday index {0} (expected 0=Monday..6=Sunday)")]
    InvalidWeekday(u8),

    /// Malformed HH:mm clock time
    #[error("Invalid clock time '{0}' (expected HH:mm)")]
    InvalidClockTime(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}
