//! Core error types for orbit-core.
//!
//! Validation failures are refused at the point of mutation and never leave
//! partially-applied state behind. Tick evaluation itself cannot fail.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for orbit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Weather provider errors
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    /// Tick scheduler errors
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not determine where configuration lives
    #[error("Could not determine data directory: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time text is not `HH:MM`
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTimeFormat(String),

    /// Hour outside 0..=23
    #[error("Hour {0} out of range (0-23)")]
    HourOutOfRange(u32),

    /// Minute outside 0..=59
    #[error("Minute {0} out of range (0-59)")]
    MinuteOutOfRange(u32),

    /// Weekday index outside 0..=6
    #[error("Weekday {0} out of range (0=Sunday .. 6=Saturday)")]
    WeekdayOutOfRange(u8),

    /// Countdown started with a zero duration
    #[error("Countdown duration must be greater than zero")]
    ZeroDuration,

    /// Duration text could not be parsed
    #[error("Invalid duration '{0}'")]
    InvalidDuration(String),

    /// Operation not allowed in the current countdown state
    #[error("Cannot {action} while countdown is {state}")]
    InvalidCountdownState { action: &'static str, state: String },

    /// No alarm with this id
    #[error("No alarm with id {0}")]
    UnknownAlarm(String),

    /// No reminder with this id
    #[error("No reminder with id {0}")]
    UnknownReminder(String),

    /// No calendar event with this id
    #[error("No calendar event with id {0}")]
    UnknownEvent(String),

    /// Required text field left blank
    #[error("{0} must not be empty")]
    EmptyText(&'static str),

    /// Priority name not one of low, medium, high
    #[error("Invalid priority '{0}': expected low, medium or high")]
    InvalidPriority(String),
}

/// Weather provider errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Provider returned a condition code with no known mapping
    #[error("Unmapped weather condition code {0}")]
    UnmappedCondition(u32),

    /// Unknown condition name
    #[error("Unknown weather condition '{0}'")]
    UnknownCondition(String),

    /// Provider could not be reached or refused the request
    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),

    /// No data for the requested city
    #[error("No weather data for '{0}'")]
    CityNotFound(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
