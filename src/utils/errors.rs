//! Error handling for Rabbot
//!
//! Infrastructure failures (database, configuration, I/O) are carried by
//! [`RabbotError`] and propagate with `?`. Domain failures such as "no shift
//! with this name" are not errors in this sense: they are returned as
//! [`ApiError`](crate::api::ApiError) values inside an
//! [`Outcome`](crate::api::Outcome).

use thiserror::Error;

/// Main error type for Rabbot
#[derive(Error, Debug)]
pub enum RabbotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Rabbot operations
pub type Result<T> = std::result::Result<T, RabbotError>;

impl RabbotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RabbotError::Database(sqlx::Error::PoolTimedOut) => true,
            RabbotError::Database(sqlx::Error::Io(_)) => true,
            RabbotError::Database(_) => false,
            RabbotError::Migration(_) => false,
            RabbotError::Config(_) => false,
            RabbotError::ConfigLoad(_) => false,
            RabbotError::Serialization(_) => false,
            RabbotError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RabbotError::Database(_) => ErrorSeverity::Critical,
            RabbotError::Migration(_) => ErrorSeverity::Critical,
            RabbotError::Config(_) => ErrorSeverity::Critical,
            RabbotError::ConfigLoad(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
