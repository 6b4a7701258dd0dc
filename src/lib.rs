//! Rabbot schedule data layer
//!
//! Keeps the shift schedules of Telegram groups: shifts with their ordering,
//! the users belonging to each schedule, and an append-only log of cover
//! mutations. The Telegram command layer builds on the [`api`] functions.

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RabbotError, Result};
pub use api::{ApiError, Outcome};
pub use database::{DatabaseService, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
