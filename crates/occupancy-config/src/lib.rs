//! # Occupancy Config
//!
//! Report settings, filters and validated configuration for the occupancy report.
//!
//! This crate provides configuration loading, validation, and a versioned
//! settings store with lock-free snapshot reads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
