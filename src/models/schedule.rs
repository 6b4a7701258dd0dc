//! Schedule model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Shift schedule of one Telegram group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub schedule_id: i64,
    pub telegram_group_id: i64,
    pub admin_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub telegram_group_id: i64,
    pub admin_id: Option<i64>,
}
