//! Database repositories module
//!
//! Repositories borrow the connection of a [`Session`](super::Session) so
//! every query of one request runs inside the same transaction.

pub mod user;
pub mod schedule;
pub mod shift;
pub mod mutation;

// Re-export repositories
pub use user::UserRepository;
pub use schedule::ScheduleRepository;
pub use shift::ShiftRepository;
pub use mutation::MutationRepository;
