//! Input validation helpers
//!
//! Values arrive exactly as the bot layer received them, so they are typed
//! as JSON values and checked here before anything touches the store.

use serde_json::Value;
use super::{ApiError, Outcome};

/// Accept only whole numbers that fit an `i64`; numeric strings are rejected
pub fn validate_ordering(input: &Value) -> Outcome<i64> {
    match input.as_i64() {
        Some(ordering) => Outcome::ok(ordering),
        None => Outcome::fail(ApiError::ShiftOrderingIsNotAnInt(input.to_string())),
    }
}

pub fn validate_name(input: &Value) -> Outcome<String> {
    check_name(input, ApiError::NameIsNotAString, ApiError::NameIsEmpty)
}

/// Like [`validate_name`], reporting with the shift specific error codes
pub fn validate_shift_name(input: &Value) -> Outcome<String> {
    check_name(input, ApiError::ShiftNameIsNotAString, ApiError::ShiftNameIsEmpty)
}

fn check_name(input: &Value, not_a_string: ApiError, empty: ApiError) -> Outcome<String> {
    match input {
        Value::String(name) if name.is_empty() => Outcome::fail(empty),
        Value::String(name) => Outcome::ok(name.clone()),
        _ => Outcome::fail(not_a_string),
    }
}
