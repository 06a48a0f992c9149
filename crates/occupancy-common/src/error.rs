//! Error types and utilities for the occupancy report

use crate::types::{ReservationId, SiteId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for occupancy operations
pub type Result<T> = std::result::Result<T, OccupancyError>;

/// Main error type for occupancy operations.
///
/// The aggregators themselves are total; these variants only surface at the
/// boundaries (configuration, fact ingestion, export).
#[derive(Error, Debug)]
pub enum OccupancyError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for caller-supplied parameters
    #[error("Validation error: {message}")]
    Validation {
        /// What is wrong with the value.
        message: String,
        /// Offending field, when known.
        field: Option<String>,
    },

    /// Site-night or reservation input that breaks the fact contract
    #[error("Invalid input facts: {} issue(s), first: {}", .issues.len(), first_issue(.issues))]
    InvalidFacts {
        /// Every violation found, in input order.
        issues: Vec<FactIssue>,
    },

    /// Table export errors
    #[error("Export error: {message}")]
    Export {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Error message.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn first_issue(issues: &[FactIssue]) -> String {
    issues
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl OccupancyError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create an error listing every fact contract violation found
    pub fn invalid_facts(issues: Vec<FactIssue>) -> Self {
        Self::InvalidFacts { issues }
    }

    /// Create a new export error with source
    pub fn export_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Export {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error was caused by bad input data rather than setup
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidFacts { .. })
    }

    /// Fact issues carried by this error, empty for other variants
    pub fn fact_issues(&self) -> &[FactIssue] {
        match self {
            Self::InvalidFacts { issues } => issues,
            _ => &[],
        }
    }
}

/// A single violation of the site-night or reservation contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FactIssue {
    /// More than one fact for the same site and date
    DuplicateSiteNight {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
    },
    /// `on` disagrees with `isOccupied`
    OccupiedFlagMismatch {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
    },
    /// `on` or `an` outside {0, 1}
    IndicatorOutOfRange {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
        /// `on` or `an`.
        field: &'static str,
        /// Supplied value.
        value: u32,
    },
    /// A blocked night that is also occupied
    BlockedAndOccupied {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
    },
    /// Revenue below zero or not a finite number
    InvalidRevenue {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
    },
    /// A calendar field that does not match the fact's date
    CalendarMismatch {
        /// Offending site.
        site_id: SiteId,
        /// Offending night.
        date: NaiveDate,
        /// Calendar field that disagrees.
        field: &'static str,
    },
    /// Reservation whose check-out is not after its check-in
    InvalidStay {
        /// Offending reservation.
        reservation_id: ReservationId,
        /// Supplied check-in.
        check_in: NaiveDate,
        /// Supplied check-out.
        check_out: NaiveDate,
    },
}

impl fmt::Display for FactIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSiteNight { site_id, date } => {
                write!(f, "duplicate site-night for {site_id} on {date}")
            }
            Self::OccupiedFlagMismatch { site_id, date } => {
                write!(f, "occupied indicator disagrees with isOccupied for {site_id} on {date}")
            }
            Self::IndicatorOutOfRange {
                site_id,
                date,
                field,
                value,
            } => write!(f, "{field}={value} is not 0 or 1 for {site_id} on {date}"),
            Self::BlockedAndOccupied { site_id, date } => {
                write!(f, "night is both blocked and occupied for {site_id} on {date}")
            }
            Self::InvalidRevenue { site_id, date } => {
                write!(f, "revenue must be a non-negative amount for {site_id} on {date}")
            }
            Self::CalendarMismatch {
                site_id,
                date,
                field,
            } => write!(f, "{field} does not match the date for {site_id} on {date}"),
            Self::InvalidStay {
                reservation_id,
                check_in,
                check_out,
            } => write!(
                f,
                "reservation {reservation_id} checks out {check_out} on or before check-in {check_in}"
            ),
        }
    }
}
