//! Trend buckets by month, ISO week or day, with optional year-over-year companions.

use crate::aggregator::{Aggregator, PeriodOccupancy};
use crate::alignment::yoy_date;
use crate::granularity::BucketGranularity;
use crate::grouping::{group_by_day, group_by_month, group_by_week, MonthKey, PeriodTally, Tally, WeekKey};
use chrono::{Datelike, Duration, NaiveDate};
use occupancy_common::{month_bounds, month_name, DateRange, SiteNight};
use occupancy_config::SelectionOccupancy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Highest week number emitted by the weekly trend.
pub const MAX_TREND_WEEK: u32 = 52;

/// One point of the trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// `YYYY-MM`, `YYYY-Www` or `YYYY-MM-DD`.
    pub bucket_key: String,
    /// Axis label.
    pub bucket_label: String,
    /// First night of the bucket.
    pub start_date: NaiveDate,
    /// Last night of the bucket.
    pub end_date: NaiveDate,
    /// Whether the bucket touches the selection.
    pub is_in_selection: bool,
    /// Rate over every night of the bucket.
    pub full_bucket_occupancy: f64,
    /// Present only for in-selection buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_occupancy: Option<f64>,
    /// Occupied nights in the bucket.
    pub on: u32,
    /// Available nights in the bucket.
    pub an: u32,
    /// Serialized inline as `yoyOccupancy`, `yoyOn` and `yoyAn` when present.
    #[serde(flatten, with = "yoy_fields")]
    pub yoy: Option<PeriodOccupancy>,
}

mod yoy_fields {
    use crate::aggregator::PeriodOccupancy;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct YoyFields {
        yoy_occupancy: f64,
        yoy_on: u32,
        yoy_an: u32,
    }

    pub fn serialize<S: Serializer>(
        value: &Option<PeriodOccupancy>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .map(|period| YoyFields {
                yoy_occupancy: period.occupancy_percentage,
                yoy_on: period.on,
                yoy_an: period.an,
            })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PeriodOccupancy>, D::Error> {
        Ok(Option::<YoyFields>::deserialize(deserializer)?.map(|fields| PeriodOccupancy {
            occupancy_percentage: fields.yoy_occupancy,
            on: fields.yoy_on,
            an: fields.yoy_an,
        }))
    }
}

/// Parameters of one trend computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendOptions {
    /// The user's selection; buckets outside it are context.
    pub selection: DateRange,
    /// Bucket size.
    pub granularity: BucketGranularity,
    /// Keep at most this many context buckets on each side of the
    /// in-selection buckets. `None` keeps every bucket with data.
    pub tails: Option<u32>,
    /// How in-selection buckets report their selection rate.
    pub selection_occupancy: SelectionOccupancy,
}

impl TrendOptions {
    /// Options with no tail trimming and the mirrored selection rate.
    pub const fn new(selection: DateRange, granularity: BucketGranularity) -> Self {
        Self {
            selection,
            granularity,
            tails: None,
            selection_occupancy: SelectionOccupancy::FullBucket,
        }
    }
}

/// Trend aggregator with an optional comparison fact set.
#[derive(Debug, Clone, Copy)]
pub struct TrendAggregator<'a> {
    /// Bucketing options.
    pub options: TrendOptions,
    /// Facts of the comparison year, when shown.
    pub yoy: Option<&'a [SiteNight]>,
}

impl Aggregator for TrendAggregator<'_> {
    type Output = Vec<TrendBucket>;

    #[instrument(skip(self, nights), fields(count = nights.len(), granularity = %self.options.granularity))]
    fn aggregate(&self, nights: &[SiteNight]) -> Vec<TrendBucket> {
        let buckets = match self.options.granularity {
            BucketGranularity::Monthly => self.monthly(nights),
            BucketGranularity::Weekly => self.weekly(nights),
            BucketGranularity::Daily => self.daily(nights),
        };

        let buckets = match (self.options.granularity, self.options.tails) {
            (BucketGranularity::Daily, _) | (_, None) => buckets,
            (_, Some(tails)) => trim_to_tails(buckets, tails),
        };

        debug!(
            "Aggregated {} {} trend buckets",
            buckets.len(),
            self.options.granularity
        );
        buckets
    }
}

impl TrendAggregator<'_> {
    fn monthly(&self, nights: &[SiteNight]) -> Vec<TrendBucket> {
        let months = group_by_month(nights);
        let previous = self.yoy.map(group_by_month);
        let overlap_days = self.overlap_days(nights);
        let year = self.options.selection.start.year();

        (1..=12)
            .filter_map(|month| {
                let key = MonthKey::new(year, month);
                let period = months.get(&key)?;
                let (start, end) = month_bounds(year, month)?;
                let yoy = previous
                    .as_ref()
                    .and_then(|map| map.get(&key.previous_year()))
                    .map(|prior| PeriodOccupancy::from(&prior.tally));

                Some(self.period_bucket(
                    key.to_string(),
                    month_name(month, true).to_string(),
                    (start, end),
                    period,
                    overlap_days.as_ref(),
                    yoy,
                ))
            })
            .collect()
    }

    fn weekly(&self, nights: &[SiteNight]) -> Vec<TrendBucket> {
        let weeks = group_by_week(nights);
        let previous = self.yoy.map(group_by_week);
        let overlap_days = self.overlap_days(nights);
        let year = self.options.selection.start.year();

        (1..=MAX_TREND_WEEK)
            .filter_map(|week| {
                let key = WeekKey::new(year, week);
                let period = weeks.get(&key)?;
                let bounds = (period.first_date()?, period.last_date()?);
                let yoy = previous
                    .as_ref()
                    .and_then(|map| map.get(&key.previous_year()))
                    .map(|prior| PeriodOccupancy::from(&prior.tally));

                Some(self.period_bucket(
                    key.to_string(),
                    format!("W{week}"),
                    bounds,
                    period,
                    overlap_days.as_ref(),
                    yoy,
                ))
            })
            .collect()
    }

    fn daily(&self, nights: &[SiteNight]) -> Vec<TrendBucket> {
        let days = group_by_day(nights);
        let previous = self.yoy.map(group_by_day);
        let DateRange { start, end } = self.options.selection;

        std::iter::successors(Some(start), |day| Some(*day + Duration::days(1)))
            .take_while(|day| *day < end)
            .filter_map(|day| {
                let tally = days.get(&day)?;
                let rate = tally.occupancy_rate();
                let yoy = previous
                    .as_ref()
                    .and_then(|map| map.get(&yoy_date(day)))
                    .map(PeriodOccupancy::from);

                Some(TrendBucket {
                    bucket_key: day.format("%Y-%m-%d").to_string(),
                    bucket_label: day.format("%m/%d").to_string(),
                    start_date: day,
                    end_date: day,
                    is_in_selection: true,
                    full_bucket_occupancy: rate,
                    selection_occupancy: Some(rate),
                    on: tally.on,
                    an: tally.an,
                    yoy,
                })
            })
            .collect()
    }

    /// Day tallies, computed only when the overlap-only rate needs them.
    fn overlap_days(&self, nights: &[SiteNight]) -> Option<BTreeMap<NaiveDate, Tally>> {
        match self.options.selection_occupancy {
            SelectionOccupancy::FullBucket => None,
            SelectionOccupancy::OverlapOnly => Some(group_by_day(nights)),
        }
    }

    fn period_bucket(
        &self,
        bucket_key: String,
        bucket_label: String,
        (start, end): (NaiveDate, NaiveDate),
        period: &PeriodTally,
        overlap_days: Option<&BTreeMap<NaiveDate, Tally>>,
        yoy: Option<PeriodOccupancy>,
    ) -> TrendBucket {
        let selection = self.options.selection;
        // Both intervals are compared closed, including the selection's end date
        let is_in_selection = end >= selection.start && start <= selection.end;
        let full_rate = period.tally.occupancy_rate();

        let selection_occupancy = is_in_selection.then(|| match overlap_days {
            None => full_rate,
            Some(days) => {
                // Selected nights only: the selection's end is exclusive here
                let from = start.max(selection.start);
                let until = selection.end.min(end + Duration::days(1));
                if from >= until {
                    return 0.0;
                }
                days.range(from..until)
                    .fold(Tally::default(), |mut sum, (_, tally)| {
                        sum.merge(tally);
                        sum
                    })
                    .occupancy_rate()
            }
        });

        TrendBucket {
            bucket_key,
            bucket_label,
            start_date: start,
            end_date: end,
            is_in_selection,
            full_bucket_occupancy: full_rate,
            selection_occupancy,
            on: period.tally.on,
            an: period.tally.an,
            yoy,
        }
    }
}

/// Keep at most `tails` out-of-selection buckets before the first and after
/// the last in-selection bucket. Buckets are left alone when none is in selection.
fn trim_to_tails(buckets: Vec<TrendBucket>, tails: u32) -> Vec<TrendBucket> {
    let tails = tails as usize;
    let first = buckets.iter().position(|bucket| bucket.is_in_selection);
    let last = buckets.iter().rposition(|bucket| bucket.is_in_selection);

    match (first, last) {
        (Some(first), Some(last)) => {
            let from = first.saturating_sub(tails);
            let to = (last + tails).min(buckets.len() - 1);
            buckets
                .into_iter()
                .skip(from)
                .take(to - from + 1)
                .collect()
        }
        _ => buckets,
    }
}

/// Trend buckets over `nights` at the granularity in `options`.
pub fn calculate_trend_data(
    nights: &[SiteNight],
    options: TrendOptions,
    yoy: Option<&[SiteNight]>,
) -> Vec<TrendBucket> {
    TrendAggregator { options, yoy }.aggregate(nights)
}
