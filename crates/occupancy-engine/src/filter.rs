//! Fact selection by date range and site filters.

use occupancy_common::{DateRange, SiteNight};
use occupancy_config::ReportFilters;

/// Facts whose date lies in `[range.start, range.end)`.
pub fn filter_by_date_range(nights: &[SiteNight], range: &DateRange) -> Vec<SiteNight> {
    nights
        .iter()
        .filter(|night| range.contains(night.date))
        .cloned()
        .collect()
}

/// Facts inside `range` that pass the site and site type filters.
///
/// `range` is taken separately from `filters` so the same filters can select
/// context and year-over-year ranges.
pub fn filter_site_nights(
    nights: &[SiteNight],
    filters: &ReportFilters,
    range: &DateRange,
) -> Vec<SiteNight> {
    nights
        .iter()
        .filter(|night| {
            range.contains(night.date)
                && filters.includes_site(&night.site_id)
                && filters.includes_site_type(&night.site_type_id)
        })
        .cloned()
        .collect()
}
