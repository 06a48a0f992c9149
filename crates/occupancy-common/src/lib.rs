//! # Occupancy Common
//!
//! Site-night fact model, shared types, and common functionality for the
//! occupancy report.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the occupancy workspace: the fact contract, the error
//! vocabulary, logging bootstrap, and calendar/display helpers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{FactIssue, OccupancyError, Result};
pub use logging::*;
pub use types::*;
pub use utils::*;
