//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for schedule, shift and cover changes.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::api::ApiError;
use crate::config::LoggingConfig;
use crate::utils::errors::{RabbotError, Result};

/// Initialize logging based on configuration.
///
/// Returns the guard of the file appender when file logging is enabled; it
/// must be kept alive for buffered lines to be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| RabbotError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RabbotError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log schedule level events (creation, deletion, membership)
pub fn log_schedule_event(telegram_group_id: i64, event: &str, user_id: Option<i64>) {
    info!(
        telegram_group_id = telegram_group_id,
        event = event,
        user_id = user_id,
        "Schedule event occurred"
    );
}

/// Log shift changes
pub fn log_shift_change(shift_id: i64, action: &str, name: Option<&str>) {
    info!(
        shift_id = shift_id,
        action = action,
        name = name,
        "Shift changed"
    );
}

/// Log an appended cover mutation
pub fn log_cover_mutation(shift_id: i64, shift_date: chrono::NaiveDate, mutator_id: i64, new_user_id: Option<i64>) {
    info!(
        shift_id = shift_id,
        shift_date = %shift_date,
        mutator_id = mutator_id,
        new_user_id = new_user_id,
        "Cover mutation appended"
    );
}

/// Log a lookup that found several rows for a key that should be unique
pub fn log_integrity_violation(entity: &str, key: &str, matches: usize) {
    warn!(
        entity = entity,
        key = key,
        matches = matches,
        "Data integrity violation: more than one match for a unique key"
    );
}

/// Log an operation that was refused with domain errors
pub fn log_rejected(operation: &str, errors: &[ApiError]) {
    let codes: Vec<&str> = errors.iter().map(ApiError::code).collect();
    debug!(
        operation = operation,
        codes = ?codes,
        "Operation rejected"
    );
}
