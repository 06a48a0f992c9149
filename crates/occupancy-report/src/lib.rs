//! # Occupancy Report
//!
//! Command-line front end for the occupancy aggregation engine.
//!
//! Reads site-night facts and optional reservations from JSON files, builds
//! the report for the configured selection and renders it as JSON or CSV.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
