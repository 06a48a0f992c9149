//! Weekday profile: occupancy per night of the week.

use crate::aggregator::{Aggregator, PeriodOccupancy};
use crate::grouping::group_by_weekday;
use occupancy_common::{weekday_name, SiteNight};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One weekday of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayProfileEntry {
    /// 0 = Sunday
    pub weekday: u8,
    /// Full English weekday name.
    pub weekday_name: String,
    /// Rate over the selection.
    pub current_period: PeriodOccupancy,
    /// Rate over the comparison year, when shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoy_period: Option<PeriodOccupancy>,
}

/// Weekday aggregator with an optional comparison fact set.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayAggregator<'a> {
    /// Facts of the comparison year, when shown.
    pub yoy: Option<&'a [SiteNight]>,
}

impl Aggregator for WeekdayAggregator<'_> {
    type Output = Vec<WeekdayProfileEntry>;

    #[instrument(skip(self, nights), fields(count = nights.len(), yoy = self.yoy.is_some()))]
    fn aggregate(&self, nights: &[SiteNight]) -> Vec<WeekdayProfileEntry> {
        let current = group_by_weekday(nights);
        let previous = self.yoy.map(group_by_weekday);

        let entries: Vec<WeekdayProfileEntry> = (0u8..7)
            .zip(current.iter())
            .map(|(weekday, tally)| WeekdayProfileEntry {
                weekday,
                weekday_name: weekday_name(weekday, true).to_string(),
                current_period: PeriodOccupancy::from(tally),
                yoy_period: previous
                    .as_ref()
                    .map(|tallies| PeriodOccupancy::from(&tallies[usize::from(weekday)])),
            })
            .collect();

        debug!("Aggregated {} weekday profile entries", entries.len());
        entries
    }
}

/// Weekday profile over `nights`, with year-over-year companions when `yoy` is given.
pub fn calculate_weekday_data(
    nights: &[SiteNight],
    yoy: Option<&[SiteNight]>,
) -> Vec<WeekdayProfileEntry> {
    WeekdayAggregator { yoy }.aggregate(nights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use occupancy_common::test_utils::{date, fixtures, strategies};
    use proptest::prelude::*;

    #[test]
    fn test_single_friday_night() {
        let site = fixtures::site(1);
        let nights = vec![fixtures::occupied(&site, date(2025, 3, 7), "res-1", 90.0)];

        let profile = calculate_weekday_data(&nights, None);

        assert_eq!(profile.len(), 7);
        for entry in &profile {
            let expected = if entry.weekday == 5 { 100.0 } else { 0.0 };
            assert_eq!(entry.current_period.occupancy_percentage, expected);
            assert!(entry.yoy_period.is_none());
        }
        assert_eq!(profile[5].weekday_name, "Fri");
    }

    #[test]
    fn test_yoy_companions_present_for_every_weekday() {
        let site = fixtures::site(1);
        let current = vec![fixtures::occupied(&site, date(2025, 3, 7), "res-1", 90.0)];
        let previous = vec![
            fixtures::occupied(&site, date(2024, 3, 8), "res-0", 80.0),
            fixtures::vacant(&site, date(2024, 3, 9)),
        ];

        let profile = calculate_weekday_data(&current, Some(previous.as_slice()));

        assert!(profile.iter().all(|entry| entry.yoy_period.is_some()));
        let friday = profile[5].yoy_period.unwrap();
        assert_eq!((friday.on, friday.an), (1, 1));
        let saturday = profile[6].yoy_period.unwrap();
        assert_eq!(saturday.occupancy_percentage, 0.0);
        assert_eq!(saturday.an, 1);
    }

    #[test]
    fn test_entry_json_shape() {
        let profile = calculate_weekday_data(&[], Some(&[][..]));
        let json = serde_json::to_value(&profile[0]).unwrap();
        assert_eq!(json["weekdayName"], "Sun");
        assert_eq!(json["currentPeriod"]["occupancyPercentage"], 0.0);
        assert_eq!(json["yoyPeriod"]["an"], 0);
    }

    proptest! {
        #[test]
        fn prop_always_seven_entries(nights in strategies::site_nights(50)) {
            let profile = calculate_weekday_data(&nights, None);
            prop_assert_eq!(profile.len(), 7);
            for (index, entry) in profile.iter().enumerate() {
                prop_assert_eq!(usize::from(entry.weekday), index);
            }
        }
    }
}
