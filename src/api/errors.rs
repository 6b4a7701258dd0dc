//! Domain error catalog
//!
//! These errors are not raised: they are collected into the error list of an
//! [`Outcome`](super::Outcome). Each one carries a stable machine readable
//! code so callers can branch on the cause instead of matching text.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Ordering should be an integer and not {0}")]
    ShiftOrderingIsNotAnInt(String),

    #[error("Shift name must be a string")]
    ShiftNameIsNotAString,

    #[error("Shift name may not be empty")]
    ShiftNameIsEmpty,

    #[error("Name must be a string")]
    NameIsNotAString,

    #[error("Name may not be empty")]
    NameIsEmpty,

    #[error("No shifts with ID {0}")]
    NoShiftWithId(i64),

    #[error("More than 1 shift with ID {0}")]
    MoreThan1ShiftWithId(i64),

    #[error("No shifts named '{0}' in this group")]
    NoShiftWithName(String),

    #[error("More than 1 shift named '{0}' in group")]
    MoreThan1ShiftWithName(String),

    #[error("There is already a shift named '{0}' in this group")]
    AlreadyShiftWithName(String),

    #[error("Shift {shift_id} does not belong to the schedule for Telegram group ID {telegram_group_id}")]
    ShiftNotInSchedule { shift_id: i64, telegram_group_id: i64 },

    #[error("No users with telegram user ID {0}")]
    NoUserWithTelegramUserId(i64),

    #[error("More than 1 user with telegram user ID {0}")]
    MoreThan1UserWithTelegramUserId(i64),

    #[error("No schedule with ID {0}")]
    NoScheduleWithId(i64),

    #[error("More than one schedule with ID {0}")]
    MoreThan1ScheduleWithId(i64),

    #[error("No schedule for Telegram group ID {0}")]
    NoScheduleWithTelegramGroupId(i64),

    #[error("More than one schedule for Telegram group ID {0}")]
    MoreThan1ScheduleWithTelegramGroupId(i64),

    #[error("There is already a schedule for Telegram group ID {0}")]
    AlreadyScheduleWithTelegramGroupId(i64),

    #[error("Shift is already covered by {current}")]
    ShiftAlreadyCovered { current: String },
}

/// Broad class of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unusable input; nothing was looked up
    Validation,
    NotFound,
    /// Several rows for a key that should be unique
    Integrity,
    /// The change clashes with existing state
    Conflict,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ShiftOrderingIsNotAnInt(_) => "shift-ordering-is-not-an-int",
            ApiError::ShiftNameIsNotAString => "shift-name-is-not-a-string",
            ApiError::ShiftNameIsEmpty => "shift-name-is-empty",
            ApiError::NameIsNotAString => "name-is-not-a-string",
            ApiError::NameIsEmpty => "name-is-empty",
            ApiError::NoShiftWithId(_) => "no-shift-with-id",
            ApiError::MoreThan1ShiftWithId(_) => "more-than-1-shift-with-id",
            ApiError::NoShiftWithName(_) => "no-shift-with-name",
            ApiError::MoreThan1ShiftWithName(_) => "more-than-1-shift-with-name",
            ApiError::AlreadyShiftWithName(_) => "already-shift-with-name",
            ApiError::ShiftNotInSchedule { .. } => "shift-not-in-schedule",
            ApiError::NoUserWithTelegramUserId(_) => "no-users-with-telegram-user-id",
            ApiError::MoreThan1UserWithTelegramUserId(_) => "more-than-1-user-with-telegram-user-id",
            ApiError::NoScheduleWithId(_) => "no-schedule-with-id",
            ApiError::MoreThan1ScheduleWithId(_) => "more-than-1-schedule-with-id",
            ApiError::NoScheduleWithTelegramGroupId(_) => "no-schedule-with-telegram-group-id",
            ApiError::MoreThan1ScheduleWithTelegramGroupId(_) => "more-than-1-schedule-with-telegram-group-id",
            ApiError::AlreadyScheduleWithTelegramGroupId(_) => "already-schedule-with-telegram-group-id",
            ApiError::ShiftAlreadyCovered { .. } => "shift-already-covered",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::ShiftOrderingIsNotAnInt(_)
            | ApiError::ShiftNameIsNotAString
            | ApiError::ShiftNameIsEmpty
            | ApiError::NameIsNotAString
            | ApiError::NameIsEmpty => ErrorKind::Validation,
            ApiError::NoShiftWithId(_)
            | ApiError::NoShiftWithName(_)
            | ApiError::NoUserWithTelegramUserId(_)
            | ApiError::NoScheduleWithId(_)
            | ApiError::NoScheduleWithTelegramGroupId(_) => ErrorKind::NotFound,
            ApiError::MoreThan1ShiftWithId(_)
            | ApiError::MoreThan1ShiftWithName(_)
            | ApiError::MoreThan1UserWithTelegramUserId(_)
            | ApiError::MoreThan1ScheduleWithId(_)
            | ApiError::MoreThan1ScheduleWithTelegramGroupId(_) => ErrorKind::Integrity,
            ApiError::AlreadyShiftWithName(_)
            | ApiError::ShiftNotInSchedule { .. }
            | ApiError::AlreadyScheduleWithTelegramGroupId(_)
            | ApiError::ShiftAlreadyCovered { .. } => ErrorKind::Conflict,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
