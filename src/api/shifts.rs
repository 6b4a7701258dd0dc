//! Shift operations

use serde_json::Value;
use tracing::debug;
use crate::database::Session;
use crate::models::shift::{Shift, CreateShiftRequest, UpdateShiftRequest};
use crate::utils::errors::Result;
use crate::utils::logging::log_shift_change;
use super::schedules::get_schedule_by_group;
use super::validation::{validate_ordering, validate_shift_name};
use super::{rejected, ApiError, Outcome};

/// Fetch shift by ID
pub async fn get_shift_by_id(session: &mut Session, shift_id: i64) -> Result<Outcome<Shift>> {
    debug!(shift_id = shift_id, "Getting shift by ID");
    let shifts = session.shifts().find_by_id(shift_id).await?;

    Ok(Outcome::single(
        shifts,
        "shift",
        shift_id,
        || ApiError::NoShiftWithId(shift_id),
        || ApiError::MoreThan1ShiftWithId(shift_id),
    ))
}

/// Fetch shift by name within the schedule of a Telegram group
pub async fn get_shift_by_name(session: &mut Session, telegram_group_id: i64, name: &Value) -> Result<Outcome<Shift>> {
    let name = validate_shift_name(name);
    let schedule = get_schedule_by_group(session, telegram_group_id).await?;

    let (name, schedule) = match name.zip(schedule).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("get_shift_by_name", errors)),
    };

    let shifts = session.shifts().find_by_name(schedule.schedule_id, &name).await?;
    Ok(Outcome::single(
        shifts,
        "shift",
        format!("{}/{}", telegram_group_id, name),
        || ApiError::NoShiftWithName(name.clone()),
        || ApiError::MoreThan1ShiftWithName(name.clone()),
    ))
}

/// List all shifts belonging to the Telegram group, by ordering
pub async fn list_shifts(session: &mut Session, telegram_group_id: i64) -> Result<Outcome<Vec<Shift>>> {
    let schedule = match get_schedule_by_group(session, telegram_group_id).await?.into_result() {
        Ok(schedule) => schedule,
        Err(errors) => return Ok(rejected("list_shifts", errors)),
    };

    let shifts = session.shifts().list_for_schedule(schedule.schedule_id).await?;
    Ok(Outcome::ok(shifts))
}

/// Add a new shift to the schedule of a Telegram group.
///
/// Name and ordering are validated independently and every problem found is
/// reported, including a name already taken in the group.
pub async fn add_shift(session: &mut Session, telegram_group_id: i64, name: &Value, ordering: &Value) -> Result<Outcome<Shift>> {
    let ordering = validate_ordering(ordering);
    let name = validate_shift_name(name);
    let schedule = get_schedule_by_group(session, telegram_group_id).await?;

    let mut name_free = Outcome::ok(());
    if let (Some(name), Some(schedule)) = (name.value(), schedule.value()) {
        if !session.shifts().find_by_name(schedule.schedule_id, name).await?.is_empty() {
            name_free = Outcome::fail(ApiError::AlreadyShiftWithName(name.clone()));
        }
    }

    let (((ordering, name), schedule), ()) = match ordering.zip(name).zip(schedule).zip(name_free).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("add_shift", errors)),
    };

    let shift = session
        .shifts()
        .create(CreateShiftRequest {
            schedule_id: schedule.schedule_id,
            name,
            ordering,
        })
        .await?;
    log_shift_change(shift.shift_id, "created", Some(&shift.name));

    Ok(Outcome::ok(shift).with_message("Shift successfully created"))
}

/// Overwrite name and ordering of an existing shift
pub async fn edit_shift(session: &mut Session, shift_id: i64, name: &Value, ordering: &Value) -> Result<Outcome<Shift>> {
    let name = validate_shift_name(name);
    let ordering = validate_ordering(ordering);
    let shift = get_shift_by_id(session, shift_id).await?;

    let mut name_free = Outcome::ok(());
    if let (Some(name), Some(shift)) = (name.value(), shift.value()) {
        let holders = session.shifts().find_by_name(shift.schedule_id, name).await?;
        if holders.iter().any(|other| other.shift_id != shift.shift_id) {
            name_free = Outcome::fail(ApiError::AlreadyShiftWithName(name.clone()));
        }
    }

    let (((name, ordering), shift), ()) = match name.zip(ordering).zip(shift).zip(name_free).into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("edit_shift", errors)),
    };

    let shift = session
        .shifts()
        .update(shift.shift_id, UpdateShiftRequest { name, ordering })
        .await?;
    log_shift_change(shift.shift_id, "edited", Some(&shift.name));

    Ok(Outcome::ok(shift).with_message("Shift successfully edited"))
}

/// Delete shift together with its mutation log
pub async fn delete_shift(session: &mut Session, shift_id: i64) -> Result<Outcome<()>> {
    let shift = match get_shift_by_id(session, shift_id).await?.into_result() {
        Ok(shift) => shift,
        Err(errors) => return Ok(rejected("delete_shift", errors)),
    };

    session.shifts().delete(shift.shift_id).await?;
    log_shift_change(shift.shift_id, "deleted", Some(&shift.name));

    Ok(Outcome::ok(()).with_message("Shift deleted"))
}
