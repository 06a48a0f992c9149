//! Test utilities and shared fixtures for the occupancy workspace.
//!
//! Compiled for this crate's own tests and, through the `testing` feature,
//! for the unit and integration tests of the other crates.

use crate::types::{Reservation, Site, SiteNight};
use chrono::{Duration, NaiveDate};
use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Shorthand for a calendar date; panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Site and fact fixtures.
pub mod fixtures {
    use super::*;

    /// Site types used by the fixtures, matching the demo campground.
    pub const SITE_TYPES: [(&str, &str); 5] = [
        ("type-1", "RV Full Hookup"),
        ("type-2", "RV Partial Hookup"),
        ("type-3", "Tent Site"),
        ("type-4", "Cabin"),
        ("type-5", "Glamping"),
    ];

    /// Site `site-{n}` named `Site {n:03}`, with its type chosen round-robin.
    pub fn site(n: usize) -> Site {
        let (type_id, type_name) = SITE_TYPES[(n.max(1) - 1) % SITE_TYPES.len()];
        Site::new(
            format!("site-{n}").as_str(),
            format!("Site {n:03}"),
            type_id,
            type_name,
        )
    }

    /// An unoccupied, unblocked night.
    pub fn vacant(site: &Site, date: NaiveDate) -> SiteNight {
        SiteNight::builder(site, date).build()
    }

    /// An occupied night belonging to `reservation`.
    pub fn occupied(site: &Site, date: NaiveDate, reservation: &str, revenue: f64) -> SiteNight {
        SiteNight::builder(site, date)
            .occupied(reservation, revenue)
            .build()
    }

    /// A blocked night, excluded from capacity.
    pub fn blocked(site: &Site, date: NaiveDate) -> SiteNight {
        SiteNight::builder(site, date).blocked().build()
    }

    /// Facts and stays for a small portfolio, deterministic for a given input.
    #[derive(Debug, Clone)]
    pub struct Portfolio {
        /// Generated sites, `site-1` upward.
        pub sites: Vec<Site>,
        /// One fact per site and night.
        pub site_nights: Vec<SiteNight>,
        /// Stays behind the occupied facts.
        pub reservations: Vec<Reservation>,
    }

    /// Generate a portfolio of `site_count` sites over `[start, start + nights)`.
    ///
    /// Each site cycles through stays of 2..=5 nights separated by one vacant
    /// night; every seventh vacant night of a site is blocked instead.
    pub fn portfolio(site_count: usize, start: NaiveDate, nights: u32) -> Portfolio {
        let end = start + Duration::days(i64::from(nights));
        let sites: Vec<Site> = (1..=site_count).map(site).collect();
        let mut site_nights = Vec::new();
        let mut reservations = Vec::new();
        let mut next_reservation = 1_usize;

        for (index, site) in sites.iter().enumerate() {
            let mut day = start;
            let mut stay_cycle = index;
            let mut gap_count = 0_usize;

            while day < end {
                let length = 2 + (stay_cycle % 4) as i64;
                let check_out = (day + Duration::days(length)).min(end);
                let id = format!("res-{next_reservation}");
                next_reservation += 1;
                let rate = 40.0 + 10.0 * (index % SITE_TYPES.len()) as f64;

                reservations.push(Reservation::new(id.as_str(), site.id.clone(), day, check_out));
                let mut night = day;
                while night < check_out {
                    site_nights.push(occupied(site, night, &id, rate));
                    night += Duration::days(1);
                }

                day = check_out;
                if day < end {
                    gap_count += 1;
                    if gap_count % 7 == 0 {
                        site_nights.push(blocked(site, day));
                    } else {
                        site_nights.push(vacant(site, day));
                    }
                    day += Duration::days(1);
                }
                stay_cycle += 1;
            }
        }

        Portfolio {
            sites,
            site_nights,
            reservations,
        }
    }
}

/// Proptest strategies for fact streams.
#[cfg(feature = "proptest")]
pub mod strategies {
    use super::fixtures;
    use crate::types::SiteNight;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    /// A single well-formed fact: occupied, blocked or vacant, never both.
    pub fn site_night() -> impl Strategy<Value = SiteNight> {
        (1usize..6, 0i64..800, 0u8..3, 0.0f64..400.0).prop_map(|(site_n, offset, status, revenue)| {
            let site = fixtures::site(site_n);
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid base date");
            let date = base + Duration::days(offset);
            match status {
                0 => fixtures::vacant(&site, date),
                1 => fixtures::blocked(&site, date),
                _ => fixtures::occupied(&site, date, &format!("res-{site_n}-{offset}"), revenue),
            }
        })
    }

    /// Up to `max_len` well-formed facts (site+date pairs may repeat).
    pub fn site_nights(max_len: usize) -> impl Strategy<Value = Vec<SiteNight>> {
        prop::collection::vec(site_night(), 0..max_len)
    }
}
