//! Shift repository implementation

use sqlx::SqliteConnection;
use chrono::Utc;
use crate::models::shift::{Shift, CreateShiftRequest, UpdateShiftRequest};
use crate::utils::errors::RabbotError;

pub struct ShiftRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ShiftRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new shift
    pub async fn create(&mut self, request: CreateShiftRequest) -> Result<Shift, RabbotError> {
        let now = Utc::now();
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (schedule_id, name, ordering, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING shift_id, schedule_id, name, ordering, created_at, updated_at
            "#
        )
        .bind(request.schedule_id)
        .bind(request.name)
        .bind(request.ordering)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(shift)
    }

    /// Find shifts by ID
    pub async fn find_by_id(&mut self, shift_id: i64) -> Result<Vec<Shift>, RabbotError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT shift_id, schedule_id, name, ordering, created_at, updated_at FROM shifts WHERE shift_id = ?"
        )
        .bind(shift_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(shifts)
    }

    /// Find shifts of a schedule by name
    pub async fn find_by_name(&mut self, schedule_id: i64, name: &str) -> Result<Vec<Shift>, RabbotError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT shift_id, schedule_id, name, ordering, created_at, updated_at FROM shifts WHERE schedule_id = ? AND name = ? ORDER BY shift_id ASC"
        )
        .bind(schedule_id)
        .bind(name)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(shifts)
    }

    /// List shifts of a schedule by ordering, oldest first on ties
    pub async fn list_for_schedule(&mut self, schedule_id: i64) -> Result<Vec<Shift>, RabbotError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT shift_id, schedule_id, name, ordering, created_at, updated_at FROM shifts WHERE schedule_id = ? ORDER BY ordering ASC, shift_id ASC"
        )
        .bind(schedule_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(shifts)
    }

    /// Update shift name and ordering
    pub async fn update(&mut self, shift_id: i64, request: UpdateShiftRequest) -> Result<Shift, RabbotError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET name = ?,
                ordering = ?,
                updated_at = ?
            WHERE shift_id = ?
            RETURNING shift_id, schedule_id, name, ordering, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.ordering)
        .bind(Utc::now())
        .bind(shift_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(shift)
    }

    /// Delete shift and its mutations; returns the number of shifts removed
    pub async fn delete(&mut self, shift_id: i64) -> Result<u64, RabbotError> {
        sqlx::query("DELETE FROM mutations WHERE shift_id = ?")
            .bind(shift_id)
            .execute(&mut *self.conn)
            .await?;

        let result = sqlx::query("DELETE FROM shifts WHERE shift_id = ?")
            .bind(shift_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count total shifts
    pub async fn count(&mut self) -> Result<i64, RabbotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shifts")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count.0)
    }
}
