//! Core error types for smolhabits-core.
//!
//! The domain itself never fails loudly: malformed input is ignored and
//! notification failures are logged. These types cover the places where a
//! caller still needs to know why something did not happen.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smolhabits-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

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
    /// Could not determine or create the config directory
    #[error("Config directory unavailable: {0}")]
    NoDataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Hour outside 0..=23
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),

    /// Minute outside 0..=59
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),

    /// No calendar day follows `date`
    #[error("no day follows {date} to schedule {hour:02}:{minute:02} on")]
    DateOutOfRange {
        date: chrono::NaiveDate,
        hour: u32,
        minute: u32,
    },
}

/// Notification-specific errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Backend could not create the delivery channel
    #[error("failed to create channel '{channel}': {message}")]
    ChannelFailed { channel: String, message: String },

    /// Backend refused or failed to show the notification
    #[error("failed to show notification {id}: {message}")]
    ShowFailed { id: u32, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
