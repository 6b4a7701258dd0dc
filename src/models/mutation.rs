//! Mutation model
//!
//! A mutation records who covers a shift on a given date. Rows are only ever
//! appended; the cover for a date is derived from the log.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use super::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Mutation {
    pub mutation_id: i64,
    pub schedule_id: i64,
    pub shift_id: i64,
    pub shift_date: NaiveDate,
    /// User who made the change
    pub mutator_id: i64,
    /// New cover; `None` leaves the shift uncovered
    pub new_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMutationRequest {
    pub schedule_id: i64,
    pub shift_id: i64,
    pub shift_date: NaiveDate,
    pub mutator_id: i64,
    pub new_user_id: Option<i64>,
}

/// Cover of a shift on a date, derived from the mutation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum ShiftCover {
    /// No mutation applies; the regular schedule holds
    Regular,
    Uncovered,
    CoveredBy(User),
}

impl ShiftCover {
    pub fn is_covered(&self) -> bool {
        !matches!(self, ShiftCover::Uncovered)
    }
}
