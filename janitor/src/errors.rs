//! Custom error types for the janitor
//!
//! Three tiers: per-path store failures are folded into the report, run-level
//! cleanup failures are returned to the trigger, and startup failures
//! (configuration, authentication) stop the process.

use chrono::{DateTime, Utc};
use std::fmt;

/// Startup error: configuration or the initial database connection
#[derive(Debug)]
pub enum JanitorError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Remote database errors
    Store(StoreError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Missing required environment variable
    MissingRequired { field: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

/// Remote database error variants
#[derive(Debug)]
pub enum StoreError {
    /// Could not obtain or refresh an access token
    Auth { reason: String },

    /// Request never produced a response (connect, timeout, TLS)
    Request { path: String, reason: String },

    /// Database rejected the request for lack of permission
    PermissionDenied { path: String, message: String },

    /// Database answered with an unexpected status
    Status {
        path: String,
        status: u16,
        message: String,
    },

    /// Response body could not be interpreted
    InvalidResponse { path: String, reason: String },

    /// Backend-specific failure carried as a bare message
    Backend(String),
}

/// Run-level cleanup error variants
#[derive(Debug)]
pub enum CleanupError {
    /// Target list is empty or contains an unusable path
    InvalidTarget { reason: String },

    /// Another run holds the run guard
    AlreadyRunning {
        trigger: String,
        started_at: DateTime<Utc>,
    },

    /// Sweep task panicked or was cancelled before producing a report
    Interrupted { reason: String },
}

impl fmt::Display for JanitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JanitorError::Config(e) => write!(f, "Configuration error: {}", e),
            JanitorError::Store(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required environment variable: {}", field)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Auth { reason } => write!(f, "Authentication failed: {}", reason),
            StoreError::Request { path, reason } => {
                write!(f, "Request for '{}' failed: {}", path, reason)
            }
            StoreError::PermissionDenied { path, message } => {
                write!(f, "Permission denied on '{}': {}", path, message)
            }
            StoreError::Status {
                path,
                status,
                message,
            } => write!(f, "Database returned {} for '{}': {}", status, path, message),
            StoreError::InvalidResponse { path, reason } => {
                write!(f, "Invalid response for '{}': {}", path, reason)
            }
            StoreError::Backend(message) => write!(f, "{}", message),
        }
    }
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupError::InvalidTarget { reason } => {
                write!(f, "Invalid cleanup target: {}", reason)
            }
            CleanupError::AlreadyRunning {
                trigger,
                started_at,
            } => write!(
                f,
                "A {} cleanup is already running (started {})",
                trigger,
                started_at.to_rfc3339()
            ),
            CleanupError::Interrupted { reason } => {
                write!(f, "Cleanup run interrupted: {}", reason)
            }
        }
    }
}

impl std::error::Error for JanitorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StoreError {}
impl std::error::Error for CleanupError {}

impl From<ConfigError> for JanitorError {
    fn from(err: ConfigError) -> Self {
        JanitorError::Config(err)
    }
}

impl From<StoreError> for JanitorError {
    fn from(err: StoreError) -> Self {
        JanitorError::Store(err)
    }
}
