//! Configuration schema definitions using serde with validation attributes.

use occupancy_common::{DateRange, LoggingConfig, SiteId, SiteTypeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Main configuration structure for the occupancy report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Report settings.
    pub report: ReportSettings,
    /// Selection filters.
    pub filters: ReportFilters,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Time bucket size requested for the trend view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Chosen from the length of the selected range.
    #[default]
    Auto,
    /// One bucket per calendar month.
    Monthly,
    /// One bucket per ISO week.
    Weekly,
    /// One bucket per night.
    Daily,
}

/// What an export should contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportOptions {
    /// Only the per-site table.
    #[default]
    TableOnly,
    /// The table plus the donut, weekday and trend series behind the charts.
    IncludeCharts,
}

/// How the trend view computes the in-selection rate of a month or week bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOccupancy {
    /// Mirror the whole-bucket rate.
    #[default]
    FullBucket,
    /// Rate over the bucket's nights that fall inside the selection only.
    OverlapOnly,
}

/// Report-wide settings, passed by value into every aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportSettings {
    /// Count blocked nights as available capacity.
    pub include_blocked: bool,
    /// Attach year-over-year companions to the weekday and trend views.
    pub show_yoy: bool,
    /// Trend bucket size.
    pub granularity: Granularity,
    /// Context buckets shown on each side of the selection.
    #[validate(range(max = 6, message = "Tails must be between 0 and 6"))]
    pub tails: u32,
    /// Export contents.
    pub export_options: ExportOptions,
    /// In-selection rate for month and week buckets.
    pub selection_occupancy: SelectionOccupancy,
}

/// Which facts the report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportFilters {
    /// Selected nights, end exclusive.
    #[validate(custom(
        function = "crate::validation::validate_date_range",
        message = "Date range end must not precede its start"
    ))]
    pub date_range: DateRange,
    /// Sites to include; empty means all.
    pub site_ids: Vec<SiteId>,
    /// Site types to include; empty means all.
    pub site_type_ids: Vec<SiteTypeId>,
}

impl ReportFilters {
    /// Whether `site_id` passes the site filter.
    pub fn includes_site(&self, site_id: &SiteId) -> bool {
        self.site_ids.is_empty() || self.site_ids.contains(site_id)
    }

    /// Whether `site_type_id` passes the site type filter.
    pub fn includes_site_type(&self, site_type_id: &SiteTypeId) -> bool {
        self.site_type_ids.is_empty() || self.site_type_ids.contains(site_type_id)
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.report.validate()?;
        self.filters.validate()?;

        let mut errors = validator::ValidationErrors::new();
        if let Err(err) = crate::validation::validate_log_level(&self.logging.level) {
            errors.add("logging.level", err);
        }
        if let Some(ref path) = self.logging.file_path {
            if let Err(err) = crate::validation::validate_file_path(path) {
                errors.add("logging.file_path", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A setting value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for Granularity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "daily" => Ok(Self::Daily),
            other => Err(UnknownVariant {
                kind: "granularity",
                value: other.to_string(),
                expected: "auto, monthly, weekly, daily",
            }),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
        };
        f.write_str(name)
    }
}

impl FromStr for SelectionOccupancy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-bucket" => Ok(Self::FullBucket),
            "overlap-only" => Ok(Self::OverlapOnly),
            other => Err(UnknownVariant {
                kind: "selection occupancy",
                value: other.to_string(),
                expected: "full-bucket, overlap-only",
            }),
        }
    }
}
