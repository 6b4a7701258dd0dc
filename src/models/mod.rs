//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod user;
pub mod schedule;
pub mod shift;
pub mod mutation;
pub mod cover;

// Re-export commonly used models
pub use user::{User, UpsertUserRequest};
pub use schedule::{Schedule, CreateScheduleRequest};
pub use shift::{Shift, CreateShiftRequest, UpdateShiftRequest};
pub use mutation::{Mutation, CreateMutationRequest, ShiftCover};
pub use cover::{Person, ShiftSlot, ShiftWindow, CoverChange};
