//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub telegram_user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert a user, or rename the existing user with the same Telegram id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserRequest {
    pub telegram_user_id: i64,
    pub name: String,
}
