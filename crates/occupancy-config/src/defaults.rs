//! Default values for report settings and filters.

use crate::schema::*;
use chrono::NaiveDate;
use occupancy_common::DateRange;

/// Default number of context buckets on each side of the selection.
pub const DEFAULT_TAILS: u32 = 2;

/// Nights in the default selection.
pub const DEFAULT_RANGE_NIGHTS: u32 = 30;

/// First night of the default selection.
pub fn default_range_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default()
}

/// The default selection: 30 nights from 2025-02-01.
pub fn default_date_range() -> DateRange {
    DateRange::from_nights(default_range_start(), DEFAULT_RANGE_NIGHTS)
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            include_blocked: false,
            show_yoy: false,
            granularity: Granularity::Auto,
            tails: DEFAULT_TAILS,
            export_options: ExportOptions::TableOnly,
            selection_occupancy: SelectionOccupancy::FullBucket,
        }
    }
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self {
            date_range: default_date_range(),
            site_ids: Vec::new(),
            site_type_ids: Vec::new(),
        }
    }
}
