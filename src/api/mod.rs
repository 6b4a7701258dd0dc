//! Record API
//!
//! Every operation takes a [`Session`](crate::database::Session) plus plain
//! identifiers and returns `Result<Outcome<T>>`. The outer `Result` fails
//! only when the store itself does; anything the caller could fix comes back
//! as an [`Outcome::Failure`] listing every problem found.

pub mod errors;
pub mod outcome;
pub mod validation;
pub mod schedules;
pub mod shifts;
pub mod users;
pub mod mutations;

pub use errors::{ApiError, ErrorKind};
pub use outcome::Outcome;
pub use validation::{validate_name, validate_ordering, validate_shift_name};
pub use schedules::{
    add_schedule, add_user_to_schedule, delete_schedule, get_schedule_by_group, get_schedule_by_id,
    list_schedule_users, remove_user_from_schedule,
};
pub use shifts::{add_shift, delete_shift, edit_shift, get_shift_by_id, get_shift_by_name, list_shifts};
pub use users::{add_or_edit_user, get_user_by_external_id};
pub use mutations::{add_mutation, get_cover_on, list_mutations};

use crate::utils::logging::log_rejected;

/// Failure exit of every operation that refuses its input, lookups included
fn rejected<T>(operation: &str, errors: Vec<ApiError>) -> Outcome<T> {
    log_rejected(operation, &errors);
    Outcome::failure(errors)
}
