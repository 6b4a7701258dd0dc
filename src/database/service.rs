//! Database service layer
//!
//! Owns the pool and hands out request scoped sessions.

use tracing::{debug, info};
use crate::config::DatabaseConfig;
use crate::database::{connection, DatabasePool, Session};
use crate::utils::errors::RabbotError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RabbotError> {
        let pool = connection::create_pool(config).await?;
        connection::run_migrations(&pool).await?;
        info!("Database service ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Open a new session; commit or finish it to keep its changes
    pub async fn session(&self) -> Result<Session, RabbotError> {
        debug!("Opening database session");
        Session::begin(&self.pool).await
    }

    pub async fn health_check(&self) -> Result<(), RabbotError> {
        connection::health_check(&self.pool).await
    }

    /// Row counts per table, for the startup log
    pub async fn get_stats(&self) -> Result<serde_json::Value, RabbotError> {
        let mut session = self.session().await?;
        let schedules = session.schedules().count().await?;
        let shifts = session.shifts().count().await?;
        let users = session.users().count().await?;
        session.rollback().await?;

        Ok(serde_json::json!({
            "schedules": schedules,
            "shifts": shifts,
            "users": users
        }))
    }
}
