//! Aggregator seam shared by the four report views.

use crate::grouping::Tally;
use occupancy_common::SiteNight;
use serde::{Deserialize, Serialize};

/// Trait for aggregating already-filtered facts into one report view.
///
/// Implementations are pure: they never filter or mutate their input, so
/// several aggregators may read the same fact slice concurrently.
pub trait Aggregator {
    /// View produced by this aggregator
    type Output;

    /// Aggregate `nights` into the view
    fn aggregate(&self, nights: &[SiteNight]) -> Self::Output;
}

/// Occupancy of one period: rate plus the sums it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodOccupancy {
    /// `on / an` as a percentage.
    pub occupancy_percentage: f64,
    /// Occupied nights.
    pub on: u32,
    /// Available nights.
    pub an: u32,
}

impl From<&Tally> for PeriodOccupancy {
    fn from(tally: &Tally) -> Self {
        Self {
            occupancy_percentage: tally.occupancy_rate(),
            on: tally.on,
            an: tally.an,
        }
    }
}
