//! Core error types for smartday-core.
//!
//! Errors are split by where they surface: request validation (before the
//! scheduler runs) and configuration loading/saving. Scheduling itself is
//! infallible; an unplaceable task is simply left out of the plan.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smartday-core.
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home directory could not be determined
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Request validation errors.
///
/// Every variant names the offending field using the request's own path
/// notation (`available_hours`, `tasks[2].duration`, ...).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Clock string is not `HH:MM` with hour < 24 and minute < 60
    #[error("Invalid clock time for '{field}': '{value}' (expected HH:MM)")]
    InvalidClock { field: String, value: String },

    /// Priority outside low/medium/high
    #[error("Unknown priority for '{field}': '{value}' (expected low, medium or high)")]
    UnknownPriority { field: String, value: String },

    /// Malformed `after:` / `before:` payload
    #[error("Invalid constraint for '{field}': '{value}': {message}")]
    InvalidConstraint {
        field: String,
        value: String,
        message: String,
    },
}

impl ValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidValue { field, .. }
            | ValidationError::InvalidClock { field, .. }
            | ValidationError::UnknownPriority { field, .. }
            | ValidationError::InvalidConstraint { field, .. } => field,
        }
    }

    /// Re-root the error under a parent field, e.g. `duration` -> `tasks[1].duration`.
    pub fn nested_under(self, parent: &str) -> Self {
        let prefix = |field: String| format!("{parent}.{field}");
        match self {
            ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
                field: prefix(field),
                message,
            },
            ValidationError::InvalidClock { field, value } => ValidationError::InvalidClock {
                field: prefix(field),
                value,
            },
            ValidationError::UnknownPriority { field, value } => {
                ValidationError::UnknownPriority {
                    field: prefix(field),
                    value,
                }
            }
            ValidationError::InvalidConstraint {
                field,
                value,
                message,
            } => ValidationError::InvalidConstraint {
                field: prefix(field),
                value,
                message,
            },
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
