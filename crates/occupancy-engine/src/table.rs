//! Per-site table rows, including average length of stay from reservations.

use crate::aggregator::Aggregator;
use crate::grouping::{group_by_site, SiteTally};
use crate::metrics::{adr, revpar};
use occupancy_common::{round_to, Reservation, ReservationId, SiteId, SiteNight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// One row of the per-site grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTableRow {
    /// Site identifier.
    pub site_id: SiteId,
    /// Site display name.
    pub site_name: String,
    /// Category display name.
    pub site_type: String,
    /// `on / an` as a percentage.
    pub occupancy_percentage: f64,
    /// Occupied nights.
    pub on: u32,
    /// Available nights.
    pub an: u32,
    /// Average length of stay in nights, one decimal; 0 without matching reservations.
    pub alos: f64,
    /// Rate over Friday and Saturday nights.
    pub weekend_occupancy_percentage: f64,
    /// Blocked facts, whatever the capacity policy.
    pub blocked_nights: u32,
    /// Average daily rate.
    pub adr: f64,
    /// Revenue per available night.
    pub revpar: f64,
    /// Net lodging revenue.
    pub total_revenue: f64,
    /// Distinct reservations touching the site in the input facts.
    pub reservation_count: usize,
}

/// Table aggregator over the reservations supplied alongside the facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAggregator<'a> {
    /// Stays used for average length of stay.
    pub reservations: &'a [Reservation],
}

impl Aggregator for TableAggregator<'_> {
    type Output = Vec<SiteTableRow>;

    #[instrument(skip(self, nights), fields(count = nights.len(), reservations = self.reservations.len()))]
    fn aggregate(&self, nights: &[SiteNight]) -> Vec<SiteTableRow> {
        let stay_lengths: HashMap<&ReservationId, i64> = self
            .reservations
            .iter()
            .map(|reservation| (&reservation.id, reservation.nights()))
            .collect();

        let rows: Vec<SiteTableRow> = group_by_site(nights)
            .into_values()
            .map(|site| table_row(site, &stay_lengths))
            .collect();

        debug!("Aggregated {} site table rows", rows.len());
        rows
    }
}

fn table_row(site: SiteTally, stay_lengths: &HashMap<&ReservationId, i64>) -> SiteTableRow {
    let stays: Vec<i64> = site
        .reservation_ids
        .iter()
        .filter_map(|id| stay_lengths.get(id).copied())
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let alos = if stays.is_empty() {
        0.0
    } else {
        round_to(stays.iter().sum::<i64>() as f64 / stays.len() as f64, 1)
    };

    SiteTableRow {
        occupancy_percentage: site.tally.occupancy_rate(),
        on: site.tally.on,
        an: site.tally.an,
        alos,
        weekend_occupancy_percentage: site.weekend.occupancy_rate(),
        blocked_nights: site.blocked_nights,
        adr: adr(site.tally.revenue, site.tally.on),
        revpar: revpar(site.tally.revenue, site.tally.an),
        total_revenue: site.tally.revenue,
        reservation_count: site.reservation_ids.len(),
        site_id: site.site_id,
        site_name: site.site_name,
        site_type: site.site_type_name,
    }
}

/// One row per site present in `nights`, ordered by site id.
pub fn calculate_table_data(nights: &[SiteNight], reservations: &[Reservation]) -> Vec<SiteTableRow> {
    TableAggregator { reservations }.aggregate(nights)
}
