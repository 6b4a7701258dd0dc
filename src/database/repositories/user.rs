//! User repository implementation

use sqlx::SqliteConnection;
use chrono::Utc;
use crate::models::user::{User, UpsertUserRequest};
use crate::utils::errors::RabbotError;

pub struct UserRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a user, or rename the one that already has this Telegram ID.
    ///
    /// Relies on the unique index on `telegram_user_id`, so concurrent calls
    /// never produce two rows.
    pub async fn upsert(&mut self, request: UpsertUserRequest) -> Result<User, RabbotError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_user_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (telegram_user_id) DO UPDATE
            SET name = excluded.name,
                updated_at = excluded.updated_at
            RETURNING user_id, telegram_user_id, name, created_at, updated_at
            "#
        )
        .bind(request.telegram_user_id)
        .bind(request.name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Find user by internal ID
    pub async fn find_by_id(&mut self, user_id: i64) -> Result<Option<User>, RabbotError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, telegram_user_id, name, created_at, updated_at FROM users WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Find users by Telegram ID
    pub async fn find_by_telegram_id(&mut self, telegram_user_id: i64) -> Result<Vec<User>, RabbotError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT user_id, telegram_user_id, name, created_at, updated_at FROM users WHERE telegram_user_id = ?"
        )
        .bind(telegram_user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&mut self) -> Result<i64, RabbotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count.0)
    }
}
