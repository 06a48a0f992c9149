//! Granularity policy for the trend view.

use chrono::{Datelike, Duration, Months, NaiveDate};
use occupancy_common::DateRange;
use occupancy_config::Granularity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete bucket size, after `auto` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketGranularity {
    /// One bucket per calendar month.
    Monthly,
    /// One bucket per ISO week.
    Weekly,
    /// One bucket per night.
    Daily,
}

impl fmt::Display for BucketGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
        };
        f.write_str(name)
    }
}

/// Ranges longer than this many days are bucketed by month.
pub const MONTHLY_THRESHOLD_DAYS: i64 = 90;

/// Ranges of at least this many days are bucketed by week.
pub const WEEKLY_THRESHOLD_DAYS: i64 = 32;

/// Pick a bucket size from the length of `[start, end)`.
pub fn determine_granularity(start: NaiveDate, end: NaiveDate) -> BucketGranularity {
    let days = (end - start).num_days();
    if days > MONTHLY_THRESHOLD_DAYS {
        BucketGranularity::Monthly
    } else if days >= WEEKLY_THRESHOLD_DAYS {
        BucketGranularity::Weekly
    } else {
        BucketGranularity::Daily
    }
}

/// Resolve the configured granularity; an explicit setting always wins.
pub fn resolve_granularity(configured: Granularity, range: &DateRange) -> BucketGranularity {
    match configured {
        Granularity::Auto => determine_granularity(range.start, range.end),
        Granularity::Monthly => BucketGranularity::Monthly,
        Granularity::Weekly => BucketGranularity::Weekly,
        Granularity::Daily => BucketGranularity::Daily,
    }
}

/// Widen `range` to whole buckets plus `tails` buckets on each side, so
/// every bucket the trend can show is backed by all of its facts.
///
/// Weekly ranges snap to Mondays and monthly ranges to the first of the
/// month. Daily trends show only the selection, so their range is returned as is.
pub fn tail_context_range(
    range: &DateRange,
    granularity: BucketGranularity,
    tails: u32,
) -> DateRange {
    let last_night = (range.end - Duration::days(1)).max(range.start);

    match granularity {
        BucketGranularity::Daily => *range,
        BucketGranularity::Weekly => {
            let pad = Duration::weeks(i64::from(tails));
            DateRange {
                start: week_start(range.start) - pad,
                end: week_start(last_night) + pad + Duration::weeks(1),
            }
        }
        BucketGranularity::Monthly => {
            let first = month_start(range.start);
            let last = month_start(last_night);
            DateRange {
                start: first.checked_sub_months(Months::new(tails)).unwrap_or(first),
                end: last
                    .checked_add_months(Months::new(tails.saturating_add(1)))
                    .unwrap_or(range.end),
            }
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
