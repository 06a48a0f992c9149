//! Ingestion checks for the site-night and reservation contract.
//!
//! Aggregators assume well-formed facts; these checks run once at the
//! boundary and report every violation instead of stopping at the first.

use crate::alignment::is_weekend_night;
use chrono::Datelike;
use occupancy_common::{
    weekday_index, FactIssue, OccupancyError, Reservation, Result, SiteId, SiteNight,
};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Every contract violation in `nights` and `reservations`, in input order.
pub fn collect_fact_issues(nights: &[SiteNight], reservations: &[Reservation]) -> Vec<FactIssue> {
    let mut issues = site_night_issues(nights);
    issues.extend(reservation_issues(reservations));
    issues
}

/// Reject facts that break the site-night contract.
#[instrument(skip(nights), fields(count = nights.len()))]
pub fn validate_site_nights(nights: &[SiteNight]) -> Result<()> {
    into_result(site_night_issues(nights))
}

/// Reject reservations whose stay is not at least one night.
#[instrument(skip(reservations), fields(count = reservations.len()))]
pub fn validate_reservations(reservations: &[Reservation]) -> Result<()> {
    into_result(reservation_issues(reservations))
}

fn into_result(issues: Vec<FactIssue>) -> Result<()> {
    if issues.is_empty() {
        debug!("Input facts passed validation");
        return Ok(());
    }
    warn!("Rejected input with {} fact issue(s)", issues.len());
    Err(OccupancyError::invalid_facts(issues))
}

fn site_night_issues(nights: &[SiteNight]) -> Vec<FactIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<(&SiteId, chrono::NaiveDate)> = HashSet::with_capacity(nights.len());

    for night in nights {
        let site_id = || night.site_id.clone();
        let date = night.date;

        if !seen.insert((&night.site_id, date)) {
            issues.push(FactIssue::DuplicateSiteNight {
                site_id: site_id(),
                date,
            });
        }

        for (field, value) in [("on", night.on), ("an", night.an)] {
            if value > 1 {
                issues.push(FactIssue::IndicatorOutOfRange {
                    site_id: site_id(),
                    date,
                    field,
                    value,
                });
            }
        }
        if night.on <= 1 && (night.on == 1) != night.is_occupied {
            issues.push(FactIssue::OccupiedFlagMismatch {
                site_id: site_id(),
                date,
            });
        }

        if night.is_blocked && night.is_occupied {
            issues.push(FactIssue::BlockedAndOccupied {
                site_id: site_id(),
                date,
            });
        }

        if !night.revenue_lodging_net.is_finite() || night.revenue_lodging_net < 0.0 {
            issues.push(FactIssue::InvalidRevenue {
                site_id: site_id(),
                date,
            });
        }

        let calendar_checks = [
            ("weekday", night.weekday == weekday_index(date)),
            ("month", night.month == date.month()),
            ("year", night.year == date.year()),
            ("weekendFlag", night.weekend_flag == is_weekend_night(date)),
            // Some producers number the days before the first Monday of January as week 0
            ("weekIso", night.week_iso <= 53),
        ];
        for (field, ok) in calendar_checks {
            if !ok {
                issues.push(FactIssue::CalendarMismatch {
                    site_id: site_id(),
                    date,
                    field,
                });
            }
        }
    }

    issues
}

fn reservation_issues(reservations: &[Reservation]) -> Vec<FactIssue> {
    reservations
        .iter()
        .filter(|reservation| reservation.nights() < 1)
        .map(|reservation| FactIssue::InvalidStay {
            reservation_id: reservation.id.clone(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
        })
        .collect()
}
