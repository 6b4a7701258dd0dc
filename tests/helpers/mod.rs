//! Test helpers module
//!
//! Shared setup for the integration tests: a fresh, migrated in-memory
//! database per test and fixture builders for the common records.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
