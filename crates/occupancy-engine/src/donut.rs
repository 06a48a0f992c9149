//! Summary donut: occupied versus available nights.

use crate::aggregator::Aggregator;
use crate::metrics::occupancy_rate;
use occupancy_common::SiteNight;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Totals behind the summary donut.
///
/// `occupied + available` always equals the summed `an`; `blocked` is an
/// informational raw count, present only when blocked nights count as capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSummary {
    /// Occupied nights.
    pub occupied: u32,
    /// Available but unoccupied nights. Negative only for facts that claim
    /// more occupied than available nights.
    pub available: i64,
    /// Blocked nights, present only when blocked inventory is included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<u32>,
    /// `on / an` as a percentage.
    pub occupancy_percentage: f64,
}

/// Donut aggregator for one blocked-inventory setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DonutAggregator {
    /// Report blocked nights as their own slice.
    pub include_blocked: bool,
}

impl Aggregator for DonutAggregator {
    type Output = DonutSummary;

    #[instrument(skip(self, nights), fields(count = nights.len()))]
    fn aggregate(&self, nights: &[SiteNight]) -> DonutSummary {
        let (on, an, blocked) = nights.iter().fold((0u32, 0u32, 0u32), |(on, an, blocked), night| {
            (
                on + night.on,
                an + night.an,
                blocked + u32::from(night.is_blocked),
            )
        });

        let summary = DonutSummary {
            occupied: on,
            available: i64::from(an) - i64::from(on),
            blocked: self.include_blocked.then_some(blocked),
            occupancy_percentage: occupancy_rate(on, an),
        };
        debug!(
            "Aggregated donut summary: {} occupied of {} available nights",
            on, an
        );
        summary
    }
}

/// Summary donut over `nights`.
pub fn calculate_donut_data(nights: &[SiteNight], include_blocked: bool) -> DonutSummary {
    DonutAggregator { include_blocked }.aggregate(nights)
}
