//! Mutation repository implementation
//!
//! Mutations are append-only: there is no update, and rows only disappear
//! together with their shift or schedule.

use sqlx::SqliteConnection;
use chrono::{NaiveDate, Utc};
use crate::models::mutation::{Mutation, CreateMutationRequest};
use crate::utils::errors::RabbotError;

pub struct MutationRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MutationRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Append a mutation
    pub async fn append(&mut self, request: CreateMutationRequest) -> Result<Mutation, RabbotError> {
        let mutation = sqlx::query_as::<_, Mutation>(
            r#"
            INSERT INTO mutations (schedule_id, shift_id, shift_date, mutator_id, new_user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING mutation_id, schedule_id, shift_id, shift_date, mutator_id, new_user_id, created_at
            "#
        )
        .bind(request.schedule_id)
        .bind(request.shift_id)
        .bind(request.shift_date)
        .bind(request.mutator_id)
        .bind(request.new_user_id)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(mutation)
    }

    /// All mutations of a shift in append order
    pub async fn list_for_shift(&mut self, shift_id: i64) -> Result<Vec<Mutation>, RabbotError> {
        let mutations = sqlx::query_as::<_, Mutation>(
            "SELECT mutation_id, schedule_id, shift_id, shift_date, mutator_id, new_user_id, created_at FROM mutations WHERE shift_id = ? ORDER BY mutation_id ASC"
        )
        .bind(shift_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(mutations)
    }

    /// Latest mutation dated on or before `date`; on equal dates the one
    /// appended last wins
    pub async fn latest_on_or_before(&mut self, shift_id: i64, date: NaiveDate) -> Result<Option<Mutation>, RabbotError> {
        let mutation = sqlx::query_as::<_, Mutation>(
            r#"
            SELECT mutation_id, schedule_id, shift_id, shift_date, mutator_id, new_user_id, created_at
            FROM mutations
            WHERE shift_id = ? AND shift_date <= ?
            ORDER BY shift_date DESC, mutation_id DESC
            LIMIT 1
            "#
        )
        .bind(shift_id)
        .bind(date)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(mutation)
    }

    /// Count mutations of a schedule
    pub async fn count_for_schedule(&mut self, schedule_id: i64) -> Result<i64, RabbotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mutations WHERE schedule_id = ?")
            .bind(schedule_id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count.0)
    }
}
