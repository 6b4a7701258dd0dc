//! Request scoped database session
//!
//! A [`Session`] wraps one transaction. Work done through it becomes visible
//! only after [`Session::commit`]; dropping the session without committing
//! rolls everything back.

use sqlx::{Sqlite, Transaction};
use tracing::debug;
use crate::api::Outcome;
use crate::utils::errors::Result;
use super::connection::DatabasePool;
use super::repositories::{MutationRepository, ScheduleRepository, ShiftRepository, UserRepository};

pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Acquire a connection and open a transaction on it
    pub async fn begin(pool: &DatabasePool) -> Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    pub fn schedules(&mut self) -> ScheduleRepository<'_> {
        ScheduleRepository::new(&mut *self.tx)
    }

    pub fn shifts(&mut self) -> ShiftRepository<'_> {
        ShiftRepository::new(&mut *self.tx)
    }

    pub fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(&mut *self.tx)
    }

    pub fn mutations(&mut self) -> MutationRepository<'_> {
        MutationRepository::new(&mut *self.tx)
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }

    /// Commit when the outcome succeeded, roll back otherwise
    pub async fn finish<T>(self, outcome: &Outcome<T>) -> Result<()> {
        if outcome.is_success() {
            self.commit().await
        } else {
            self.rollback().await
        }
    }
}
