//! Outcome values returned by every API operation

use serde::Serialize;
use crate::utils::logging::log_integrity_violation;
use super::errors::ApiError;

/// Result of an API operation.
///
/// Domain failures never unwind: they come back as `Failure` carrying every
/// problem that was found, so a caller can report them in one reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success {
        value: T,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Failure {
        errors: Vec<ApiError>,
    },
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Outcome::Success { value, message: None }
    }

    pub fn fail(error: ApiError) -> Self {
        Outcome::Failure { errors: vec![error] }
    }

    pub fn failure(errors: Vec<ApiError>) -> Self {
        Outcome::Failure { errors }
    }

    /// Resolve a lookup that must match exactly one row.
    ///
    /// More than one row means a unique key was violated upstream; that is
    /// reported, never resolved by picking one.
    pub fn single(
        mut rows: Vec<T>,
        entity: &str,
        key: impl std::fmt::Display,
        none: impl FnOnce() -> ApiError,
        many: impl FnOnce() -> ApiError,
    ) -> Self {
        match rows.len() {
            0 => Outcome::fail(none()),
            1 => match rows.pop() {
                Some(row) => Outcome::ok(row),
                None => Outcome::fail(none()),
            },
            count => {
                log_integrity_violation(entity, &key.to_string(), count);
                Outcome::fail(many())
            }
        }
    }

    /// Attach a human readable message to a success; failures are unchanged
    pub fn with_message(self, text: impl Into<String>) -> Self {
        match self {
            Outcome::Success { value, .. } => Outcome::Success { value, message: Some(text.into()) },
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { message, .. } => message.as_deref(),
            Outcome::Failure { .. } => None,
        }
    }

    /// Errors of a failure; empty for a success
    pub fn errors(&self) -> &[ApiError] {
        match self {
            Outcome::Success { .. } => &[],
            Outcome::Failure { errors } => errors,
        }
    }

    pub fn has_error(&self, code: &str) -> bool {
        self.errors().iter().any(|e| e.code() == code)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success { value, message } => Outcome::Success { value: f(value), message },
            Outcome::Failure { errors } => Outcome::Failure { errors },
        }
    }

    /// Combine two outcomes, keeping the errors of both sides on failure
    pub fn zip<U>(self, other: Outcome<U>) -> Outcome<(T, U)> {
        match (self, other) {
            (Outcome::Success { value: a, .. }, Outcome::Success { value: b, .. }) => Outcome::ok((a, b)),
            (a, b) => {
                let mut errors = a.into_errors();
                errors.extend(b.into_errors());
                Outcome::Failure { errors }
            }
        }
    }

    pub fn into_result(self) -> Result<T, Vec<ApiError>> {
        match self {
            Outcome::Success { value, .. } => Ok(value),
            Outcome::Failure { errors } => Err(errors),
        }
    }

    fn into_errors(self) -> Vec<ApiError> {
        match self {
            Outcome::Success { .. } => Vec::new(),
            Outcome::Failure { errors } => errors,
        }
    }
}
