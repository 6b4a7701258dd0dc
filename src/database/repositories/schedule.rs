//! Schedule repository implementation

use sqlx::SqliteConnection;
use chrono::Utc;
use crate::models::schedule::{Schedule, CreateScheduleRequest};
use crate::models::user::User;
use crate::utils::errors::RabbotError;

pub struct ScheduleRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ScheduleRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new schedule
    pub async fn create(&mut self, request: CreateScheduleRequest) -> Result<Schedule, RabbotError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (telegram_group_id, admin_id, created_at)
            VALUES (?, ?, ?)
            RETURNING schedule_id, telegram_group_id, admin_id, created_at
            "#
        )
        .bind(request.telegram_group_id)
        .bind(request.admin_id)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(schedule)
    }

    /// Find schedules by ID; more than one row means the table is corrupt
    pub async fn find_by_id(&mut self, schedule_id: i64) -> Result<Vec<Schedule>, RabbotError> {
        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT schedule_id, telegram_group_id, admin_id, created_at FROM schedules WHERE schedule_id = ?"
        )
        .bind(schedule_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(schedules)
    }

    /// Find schedules by Telegram group ID
    pub async fn find_by_telegram_group_id(&mut self, telegram_group_id: i64) -> Result<Vec<Schedule>, RabbotError> {
        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT schedule_id, telegram_group_id, admin_id, created_at FROM schedules WHERE telegram_group_id = ? ORDER BY schedule_id ASC"
        )
        .bind(telegram_group_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(schedules)
    }

    /// Delete a schedule together with its mutations, shifts and members.
    ///
    /// Returns the number of schedule rows removed.
    pub async fn delete(&mut self, schedule_id: i64) -> Result<u64, RabbotError> {
        sqlx::query("DELETE FROM mutations WHERE schedule_id = ?")
            .bind(schedule_id)
            .execute(&mut *self.conn)
            .await?;

        sqlx::query("DELETE FROM shifts WHERE schedule_id = ?")
            .bind(schedule_id)
            .execute(&mut *self.conn)
            .await?;

        sqlx::query("DELETE FROM schedule_users WHERE schedule_id = ?")
            .bind(schedule_id)
            .execute(&mut *self.conn)
            .await?;

        let result = sqlx::query("DELETE FROM schedules WHERE schedule_id = ?")
            .bind(schedule_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Add member to schedule; returns false if the user already was one
    pub async fn add_member(&mut self, schedule_id: i64, user_id: i64) -> Result<bool, RabbotError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO schedule_users (schedule_id, user_id, joined_at) VALUES (?, ?, ?)"
        )
        .bind(schedule_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove member from schedule; returns false if the user was no member
    pub async fn remove_member(&mut self, schedule_id: i64, user_id: i64) -> Result<bool, RabbotError> {
        let result = sqlx::query("DELETE FROM schedule_users WHERE schedule_id = ? AND user_id = ?")
            .bind(schedule_id)
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if user is member of schedule
    pub async fn is_member(&mut self, schedule_id: i64, user_id: i64) -> Result<bool, RabbotError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM schedule_users WHERE schedule_id = ? AND user_id = ?"
        )
        .bind(schedule_id)
        .bind(user_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(count.0 > 0)
    }

    /// Get schedule members in the order they joined
    pub async fn get_members(&mut self, schedule_id: i64) -> Result<Vec<User>, RabbotError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.telegram_user_id, u.name, u.created_at, u.updated_at
            FROM users u
            INNER JOIN schedule_users su ON u.user_id = su.user_id
            WHERE su.schedule_id = ?
            ORDER BY su.joined_at ASC, u.user_id ASC
            "#
        )
        .bind(schedule_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(users)
    }

    /// Count total schedules
    pub async fn count(&mut self) -> Result<i64, RabbotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schedules")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count.0)
    }
}
