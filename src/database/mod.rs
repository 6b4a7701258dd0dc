//! Database module
//!
//! This module handles database connections, sessions and table access

pub mod connection;
pub mod repositories;
pub mod service;
pub mod session;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use repositories::{UserRepository, ScheduleRepository, ShiftRepository, MutationRepository};
pub use service::DatabaseService;
pub use session::Session;
