//! Year-over-year date alignment and weekend classification.

use crate::granularity::BucketGranularity;
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use occupancy_common::DateRange;

/// Exactly 52 weeks, so the comparison date falls on the same weekday.
pub const YOY_OFFSET_DAYS: i64 = 364;

/// The comparison date one year back. Drifts from the literal anniversary
/// by a day or two each year.
pub fn yoy_date(date: NaiveDate) -> NaiveDate {
    date - Duration::days(YOY_OFFSET_DAYS)
}

/// A range moved back by the year-over-year offset.
pub fn yoy_range(range: &DateRange) -> DateRange {
    range.shifted(-YOY_OFFSET_DAYS)
}

/// The comparison range for a trend context range.
///
/// Month buckets compare against the same calendar months one year earlier,
/// so a month-aligned range moves back twelve months. Week and day buckets
/// use the weekday-preserving offset.
pub fn yoy_context_range(range: &DateRange, granularity: BucketGranularity) -> DateRange {
    match granularity {
        BucketGranularity::Monthly => {
            let year = Months::new(12);
            match (range.start.checked_sub_months(year), range.end.checked_sub_months(year)) {
                (Some(start), Some(end)) => DateRange { start, end },
                _ => yoy_range(range),
            }
        }
        BucketGranularity::Weekly | BucketGranularity::Daily => yoy_range(range),
    }
}

/// Friday and Saturday nights are weekend nights.
pub fn is_weekend_night(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}
