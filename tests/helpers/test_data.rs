//! Fixture builders
//!
//! These insert rows straight through the repositories, bypassing the API
//! checks, so tests can also set up states the API refuses to create.

use chrono::NaiveDate;
use rabbot::database::Session;
use rabbot::models::{CreateScheduleRequest, CreateShiftRequest, Schedule, Shift, UpsertUserRequest, User};

pub async fn seed_user(session: &mut Session, telegram_user_id: i64, name: &str) -> User {
    session
        .users()
        .upsert(UpsertUserRequest {
            telegram_user_id,
            name: name.to_string(),
        })
        .await
        .expect("Failed to seed user")
}

pub async fn seed_schedule(session: &mut Session, telegram_group_id: i64) -> Schedule {
    session
        .schedules()
        .create(CreateScheduleRequest {
            telegram_group_id,
            admin_id: None,
        })
        .await
        .expect("Failed to seed schedule")
}

pub async fn seed_shift(session: &mut Session, schedule: &Schedule, name: &str, ordering: i64) -> Shift {
    session
        .shifts()
        .create(CreateShiftRequest {
            schedule_id: schedule.schedule_id,
            name: name.to_string(),
            ordering,
        })
        .await
        .expect("Failed to seed shift")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date")
}
