//! User operations

use serde_json::Value;
use tracing::{debug, info};
use crate::database::Session;
use crate::models::user::{User, UpsertUserRequest};
use crate::utils::errors::Result;
use super::validation::validate_name;
use super::{rejected, ApiError, Outcome};

/// Fetch user by Telegram user ID
pub async fn get_user_by_external_id(session: &mut Session, telegram_user_id: i64) -> Result<Outcome<User>> {
    debug!(telegram_user_id = telegram_user_id, "Getting user by Telegram ID");
    let users = session.users().find_by_telegram_id(telegram_user_id).await?;

    Ok(Outcome::single(
        users,
        "user",
        telegram_user_id,
        || ApiError::NoUserWithTelegramUserId(telegram_user_id),
        || ApiError::MoreThan1UserWithTelegramUserId(telegram_user_id),
    ))
}

/// Create a new user, or change the name associated with the Telegram user ID
pub async fn add_or_edit_user(session: &mut Session, telegram_user_id: i64, name: &Value) -> Result<Outcome<User>> {
    let name = match validate_name(name).into_result() {
        Ok(name) => name,
        Err(errors) => return Ok(rejected("add_or_edit_user", errors)),
    };

    let user = session
        .users()
        .upsert(UpsertUserRequest { telegram_user_id, name })
        .await?;
    info!(user_id = user.user_id, telegram_user_id = telegram_user_id, name = %user.name, "User saved");

    Ok(Outcome::ok(user).with_message("User saved"))
}
