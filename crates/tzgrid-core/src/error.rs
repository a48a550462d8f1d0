//! Core error types for tzgrid-core.
//!
//! Scoring is a pure computation, so most of these are input-validity
//! conditions surfaced to the caller rather than runtime faults.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tzgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A blocked window or rule boundary is not a strict `HH:MM` string
    #[error("Invalid window format: '{value}' (expected HH:MM, 00:00-23:59)")]
    InvalidWindowFormat { value: String },

    /// The time conversion collaborator could not resolve a timezone
    #[error("Failed to resolve timezone '{zone}'")]
    ResolutionFailure { zone: String },

    /// Anchor date is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Participant roster could not be loaded
    #[error("Failed to load roster from {path}: {message}")]
    Roster { path: PathBuf, message: String },

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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home directory could not be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
