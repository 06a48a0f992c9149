//! # Occupancy Engine
//!
//! Aggregation engine turning daily site-night facts into the views of the
//! occupancy report.
//!
//! This crate provides:
//! - Metric primitives and single-pass grouping by weekday, month, week, day and site
//! - The blocked-inventory, granularity and year-over-year alignment policies
//! - The donut, weekday, trend and per-site table aggregators
//! - Ingestion validation, CSV export and the report pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod alignment;
pub mod donut;
pub mod export;
pub mod filter;
pub mod granularity;
pub mod grouping;
pub mod metrics;
pub mod policy;
pub mod report;
pub mod table;
pub mod trend;
pub mod validation;
pub mod weekday;

pub use aggregator::*;
pub use alignment::*;
pub use donut::*;
pub use export::*;
pub use filter::*;
pub use granularity::*;
pub use grouping::*;
pub use metrics::*;
pub use policy::*;
pub use report::*;
pub use table::*;
pub use trend::*;
pub use validation::*;
pub use weekday::*;
