//! Schedule and membership operations

use tracing::debug;
use crate::database::Session;
use crate::models::schedule::{Schedule, CreateScheduleRequest};
use crate::models::user::User;
use crate::utils::errors::Result;
use crate::utils::logging::log_schedule_event;
use super::users::get_user_by_external_id;
use super::{rejected, ApiError, Outcome};

/// Fetch schedule by Telegram group ID
pub async fn get_schedule_by_group(session: &mut Session, telegram_group_id: i64) -> Result<Outcome<Schedule>> {
    debug!(telegram_group_id = telegram_group_id, "Getting schedule by Telegram group ID");
    let schedules = session.schedules().find_by_telegram_group_id(telegram_group_id).await?;

    Ok(Outcome::single(
        schedules,
        "schedule",
        telegram_group_id,
        || ApiError::NoScheduleWithTelegramGroupId(telegram_group_id),
        || ApiError::MoreThan1ScheduleWithTelegramGroupId(telegram_group_id),
    ))
}

/// Fetch schedule by ID
pub async fn get_schedule_by_id(session: &mut Session, schedule_id: i64) -> Result<Outcome<Schedule>> {
    debug!(schedule_id = schedule_id, "Getting schedule by ID");
    let schedules = session.schedules().find_by_id(schedule_id).await?;

    Ok(Outcome::single(
        schedules,
        "schedule",
        schedule_id,
        || ApiError::NoScheduleWithId(schedule_id),
        || ApiError::MoreThan1ScheduleWithId(schedule_id),
    ))
}

/// Create the schedule of a Telegram group.
///
/// The admin must already be a known user and becomes the first member.
pub async fn add_schedule(session: &mut Session, telegram_group_id: i64, admin_telegram_user_id: i64) -> Result<Outcome<Schedule>> {
    let admin = get_user_by_external_id(session, admin_telegram_user_id).await?;

    let existing = session.schedules().find_by_telegram_group_id(telegram_group_id).await?;
    let group_free = if existing.is_empty() {
        Outcome::ok(())
    } else {
        Outcome::fail(ApiError::AlreadyScheduleWithTelegramGroupId(telegram_group_id))
    };

    let (admin, ()) = match admin.zip(group_free).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("add_schedule", errors)),
    };

    let schedule = session
        .schedules()
        .create(CreateScheduleRequest {
            telegram_group_id,
            admin_id: Some(admin.user_id),
        })
        .await?;
    session.schedules().add_member(schedule.schedule_id, admin.user_id).await?;
    log_schedule_event(telegram_group_id, "schedule_created", Some(admin_telegram_user_id));

    Ok(Outcome::ok(schedule).with_message("Schedule created"))
}

/// Delete a schedule with its shifts, mutations and memberships
pub async fn delete_schedule(session: &mut Session, schedule_id: i64) -> Result<Outcome<()>> {
    let schedule = match get_schedule_by_id(session, schedule_id).await?.into_result() {
        Ok(schedule) => schedule,
        Err(errors) => return Ok(rejected("delete_schedule", errors)),
    };

    session.schedules().delete(schedule.schedule_id).await?;
    log_schedule_event(schedule.telegram_group_id, "schedule_deleted", None);

    Ok(Outcome::ok(()).with_message("Schedule deleted"))
}

/// Add user to schedule; adding an existing member changes nothing
pub async fn add_user_to_schedule(session: &mut Session, telegram_user_id: i64, telegram_group_id: i64) -> Result<Outcome<()>> {
    let user = get_user_by_external_id(session, telegram_user_id).await?;
    let schedule = get_schedule_by_group(session, telegram_group_id).await?;

    let (user, schedule) = match user.zip(schedule).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("add_user_to_schedule", errors)),
    };

    if session.schedules().add_member(schedule.schedule_id, user.user_id).await? {
        log_schedule_event(telegram_group_id, "member_added", Some(telegram_user_id));
    } else {
        debug!(telegram_group_id = telegram_group_id, telegram_user_id = telegram_user_id, "User already in schedule");
    }

    Ok(Outcome::ok(()).with_message("User added to schedule."))
}

/// Remove user from schedule; removing a non-member changes nothing
pub async fn remove_user_from_schedule(session: &mut Session, telegram_user_id: i64, telegram_group_id: i64) -> Result<Outcome<()>> {
    let user = get_user_by_external_id(session, telegram_user_id).await?;
    let schedule = get_schedule_by_group(session, telegram_group_id).await?;

    let (user, schedule) = match user.zip(schedule).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("remove_user_from_schedule", errors)),
    };

    if session.schedules().remove_member(schedule.schedule_id, user.user_id).await? {
        log_schedule_event(telegram_group_id, "member_removed", Some(telegram_user_id));
    }

    Ok(Outcome::ok(()).with_message("User removed from schedule."))
}

/// Members of the schedule of a Telegram group
pub async fn list_schedule_users(session: &mut Session, telegram_group_id: i64) -> Result<Outcome<Vec<User>>> {
    let schedule = match get_schedule_by_group(session, telegram_group_id).await?.into_result() {
        Ok(schedule) => schedule,
        Err(errors) => return Ok(rejected("list_schedule_users", errors)),
    };

    let users = session.schedules().get_members(schedule.schedule_id).await?;
    debug!(telegram_group_id = telegram_group_id, members = users.len(), "Listed schedule members");
    Ok(Outcome::ok(users))
}
