//! Core error types for dayslot-core.
//!
//! Everything in the library reports failures through this hierarchy
//! (built with thiserror). Scheduling itself never fails once its inputs
//! have been validated, so most variants describe bad input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayslot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML write errors
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
///
/// Raised at the entry points of the deriver, the placement engine and the
/// store before any computation happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A time string that is not `HH:MM` or is out of range
    #[error("Invalid time for '{field}': '{value}' ({reason})")]
    InvalidTime {
        field: String,
        value: String,
        reason: String,
    },

    /// Day window hours out of order or beyond midnight
    #[error("Invalid day window: start hour {start_hour} must be before end hour {end_hour} (max 24)")]
    InvalidDayWindow { start_hour: u32, end_hour: u32 },

    /// Invalid time range
    #[error("Invalid time range for '{field}': end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        field: String,
        start: String,
        end: String,
    },

    /// Two obligations on the same day share minutes
    #[error("Obligations '{first}' and '{second}' overlap")]
    OverlappingObligations { first: String, second: String },

    /// Unknown task id
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Unknown obligation id
    #[error("Unknown obligation: {0}")]
    UnknownObligation(String),

    /// Unknown subtask id within a known task
    #[error("Unknown subtask '{subtask_id}' in task '{task_id}'")]
    UnknownSubtask { task_id: String, subtask_id: String },

    /// Unknown template id
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_offending_field() {
        let err = ValidationError::InvalidTime {
            field: "obligation work.start_time".to_string(),
            value: "9am".to_string(),
            reason: "expected HH:MM".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("obligation work.start_time"));
        assert!(msg.contains("9am"));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::UnknownTask("t-1".to_string()).into();
        assert!(matches!(err, CoreError::Validation(ValidationError::UnknownTask(_))));
        assert_eq!(err.to_string(), "Validation error: Unknown task: t-1");
    }
}
