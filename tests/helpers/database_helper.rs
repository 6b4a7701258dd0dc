//! Test database helper utilities
//!
//! Every [`TestDatabase`] is a private in-memory SQLite database with the
//! migrations applied, so tests never see each other's rows.

use std::sync::Once;
use rabbot::config::DatabaseConfig;
use rabbot::database::{DatabaseService, Session};

static INIT: Once = Once::new();

pub struct TestDatabase {
    pub service: DatabaseService,
}

impl TestDatabase {
    /// Create a new, migrated, empty database
    pub async fn new() -> Self {
        // Initialize logging once
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("rabbot=debug")
                .with_test_writer()
                .try_init();
        });

        let service = DatabaseService::connect(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create test database");

        Self { service }
    }

    /// Open a session; the pool has a single connection, so finish or drop
    /// it before opening the next one
    pub async fn session(&self) -> Session {
        self.service.session().await.expect("Failed to open session")
    }

    /// Committed shift rows, read in a throwaway session
    pub async fn count_shifts(&self) -> i64 {
        let mut session = self.session().await;
        let count = session.shifts().count().await.expect("Failed to count shifts");
        session.rollback().await.expect("Failed to roll back");
        count
    }

    pub async fn count_users(&self) -> i64 {
        let mut session = self.session().await;
        let count = session.users().count().await.expect("Failed to count users");
        session.rollback().await.expect("Failed to roll back");
        count
    }
}
