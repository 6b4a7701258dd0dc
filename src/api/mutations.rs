//! Cover mutation operations
//!
//! Every change of cover is appended to the mutation log; nothing here
//! updates or removes a mutation.

use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::database::Session;
use crate::models::mutation::{Mutation, CreateMutationRequest, ShiftCover};
use crate::utils::errors::Result;
use crate::utils::logging::log_cover_mutation;
use super::schedules::get_schedule_by_group;
use super::shifts::get_shift_by_id;
use super::users::get_user_by_external_id;
use super::{rejected, ApiError, Outcome};

/// Record that `new_cover_telegram_user_id` covers the shift on `shift_date`.
///
/// `None` as the new cover leaves the shift uncovered on that date. Several
/// mutations for the same shift and date are allowed; the latest one wins.
pub async fn add_mutation(
    session: &mut Session,
    telegram_group_id: i64,
    actor_telegram_user_id: i64,
    shift_date: NaiveDate,
    shift_id: i64,
    new_cover_telegram_user_id: Option<i64>,
) -> Result<Outcome<Mutation>> {
    let schedule = get_schedule_by_group(session, telegram_group_id).await?;
    let actor = get_user_by_external_id(session, actor_telegram_user_id).await?;
    let shift = get_shift_by_id(session, shift_id).await?;
    let new_cover = match new_cover_telegram_user_id {
        Some(telegram_user_id) => get_user_by_external_id(session, telegram_user_id).await?.map(Some),
        None => Outcome::ok(None),
    };

    let belongs = match (schedule.value(), shift.value()) {
        (Some(schedule), Some(shift)) if shift.schedule_id != schedule.schedule_id => {
            Outcome::fail(ApiError::ShiftNotInSchedule { shift_id, telegram_group_id })
        }
        _ => Outcome::ok(()),
    };

    let combined = schedule.zip(actor).zip(shift).zip(new_cover).zip(belongs);
    let ((((schedule, actor), shift), new_cover), ()) = match combined.into_result() {
        Ok(values) => values,
        Err(errors) => return Ok(rejected("add_mutation", errors)),
    };

    let mutation = session
        .mutations()
        .append(CreateMutationRequest {
            schedule_id: schedule.schedule_id,
            shift_id: shift.shift_id,
            shift_date,
            mutator_id: actor.user_id,
            new_user_id: new_cover.map(|user| user.user_id),
        })
        .await?;
    log_cover_mutation(mutation.shift_id, mutation.shift_date, mutation.mutator_id, mutation.new_user_id);

    Ok(Outcome::ok(mutation).with_message("Mutation recorded"))
}

/// Mutation log of a shift, oldest first
pub async fn list_mutations(session: &mut Session, shift_id: i64) -> Result<Outcome<Vec<Mutation>>> {
    let shift = match get_shift_by_id(session, shift_id).await?.into_result() {
        Ok(shift) => shift,
        Err(errors) => return Ok(rejected("list_mutations", errors)),
    };

    let mutations = session.mutations().list_for_shift(shift.shift_id).await?;
    Ok(Outcome::ok(mutations))
}

/// Cover of a shift on `date`.
///
/// The latest mutation dated on or before `date` decides; with none the
/// regular schedule holds.
pub async fn get_cover_on(session: &mut Session, shift_id: i64, date: NaiveDate) -> Result<Outcome<ShiftCover>> {
    let shift = match get_shift_by_id(session, shift_id).await?.into_result() {
        Ok(shift) => shift,
        Err(errors) => return Ok(rejected("get_cover_on", errors)),
    };

    let latest = session.mutations().latest_on_or_before(shift.shift_id, date).await?;
    let cover = match latest {
        None => ShiftCover::Regular,
        Some(Mutation { new_user_id: None, .. }) => ShiftCover::Uncovered,
        Some(Mutation { new_user_id: Some(user_id), mutation_id, .. }) => {
            match session.users().find_by_id(user_id).await? {
                Some(user) => ShiftCover::CoveredBy(user),
                None => {
                    warn!(mutation_id = mutation_id, user_id = user_id, "Mutation refers to a missing user");
                    ShiftCover::Uncovered
                }
            }
        }
    };
    debug!(shift_id = shift_id, date = %date, cover = ?cover, "Resolved cover");

    Ok(Outcome::ok(cover))
}
