//! Single-pass grouping of site-night facts into typed buckets.
//!
//! Each function folds the fact list once into an ordered map keyed by a
//! strongly typed bucket identity. Buckets are independent of each other.

use crate::metrics::occupancy_rate;
use chrono::NaiveDate;
use occupancy_common::{ReservationId, SiteId, SiteNight};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::warn;

/// Calendar month bucket, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// Key for `month` of `year`.
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The same month one year earlier.
    pub const fn previous_year(self) -> Self {
        Self::new(self.year - 1, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Week bucket, displayed as `YYYY-Wnn`.
///
/// The year is the fact's calendar year and the week its supplied ISO week,
/// so the last days of December can land in week 1 of the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    /// Calendar year of the night.
    pub year: i32,
    /// Supplied ISO week.
    pub week: u32,
}

impl WeekKey {
    /// Key for `week` of `year`.
    pub const fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// The same week number one year earlier.
    pub const fn previous_year(self) -> Self {
        Self::new(self.year - 1, self.week)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// Running `{on, an, revenue}` sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    /// Occupied nights.
    pub on: u32,
    /// Available nights.
    pub an: u32,
    /// Net lodging revenue.
    pub revenue: f64,
}

impl Tally {
    /// Add one fact's indicators and revenue.
    pub fn add(&mut self, night: &SiteNight) {
        self.on += night.on;
        self.an += night.an;
        self.revenue += night.revenue_lodging_net;
    }

    /// Add another tally.
    pub fn merge(&mut self, other: &Self) {
        self.on += other.on;
        self.an += other.an;
        self.revenue += other.revenue;
    }

    /// Occupancy rate of this tally.
    pub fn occupancy_rate(&self) -> f64 {
        occupancy_rate(self.on, self.an)
    }
}

/// Tally plus the set of calendar dates that contributed to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTally {
    /// Sums over the period.
    pub tally: Tally,
    /// Nights that contributed.
    pub dates: BTreeSet<NaiveDate>,
}

impl PeriodTally {
    fn add(&mut self, night: &SiteNight) {
        self.tally.add(night);
        self.dates.insert(night.date);
    }

    /// Earliest contributing date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Latest contributing date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Per-site accumulator feeding the table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteTally {
    /// Site identifier.
    pub site_id: SiteId,
    /// Name from the first fact seen.
    pub site_name: String,
    /// Category name from the first fact seen.
    pub site_type_name: String,
    /// Sums over every night of the site.
    pub tally: Tally,
    /// Count of blocked facts, independent of the capacity policy.
    pub blocked_nights: u32,
    /// Friday and Saturday nights only.
    pub weekend: Tally,
    /// Distinct stays seen on occupied nights.
    pub reservation_ids: BTreeSet<ReservationId>,
}

impl SiteTally {
    fn new(night: &SiteNight) -> Self {
        Self {
            site_id: night.site_id.clone(),
            site_name: night.site_name.clone(),
            site_type_name: night.site_type_name.clone(),
            tally: Tally::default(),
            blocked_nights: 0,
            weekend: Tally::default(),
            reservation_ids: BTreeSet::new(),
        }
    }

    fn add(&mut self, night: &SiteNight) {
        self.tally.add(night);
        if night.is_blocked {
            self.blocked_nights += 1;
        }
        if night.weekend_flag {
            self.weekend.add(night);
        }
        if let Some(ref reservation_id) = night.reservation_id {
            self.reservation_ids.insert(reservation_id.clone());
        }
    }
}

/// Group by weekday (0 = Sunday). All seven slots are always present.
pub fn group_by_weekday(nights: &[SiteNight]) -> [Tally; 7] {
    let mut weekdays = [Tally::default(); 7];
    for night in nights {
        match weekdays.get_mut(usize::from(night.weekday)) {
            Some(tally) => tally.add(night),
            None => warn!(
                "Skipping fact for {} on {} with weekday {} outside 0..=6",
                night.site_id, night.date, night.weekday
            ),
        }
    }
    weekdays
}

/// Group by calendar month, creating buckets only for months with facts.
pub fn group_by_month(nights: &[SiteNight]) -> BTreeMap<MonthKey, PeriodTally> {
    let mut months: BTreeMap<MonthKey, PeriodTally> = BTreeMap::new();
    for night in nights {
        months
            .entry(MonthKey::new(night.year, night.month))
            .or_default()
            .add(night);
    }
    months
}

/// Group by the supplied ISO week number.
pub fn group_by_week(nights: &[SiteNight]) -> BTreeMap<WeekKey, PeriodTally> {
    let mut weeks: BTreeMap<WeekKey, PeriodTally> = BTreeMap::new();
    for night in nights {
        weeks
            .entry(WeekKey::new(night.year, night.week_iso))
            .or_default()
            .add(night);
    }
    weeks
}

/// Group by calendar day.
pub fn group_by_day(nights: &[SiteNight]) -> BTreeMap<NaiveDate, Tally> {
    let mut days: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    for night in nights {
        days.entry(night.date).or_default().add(night);
    }
    days
}

/// Group by site, ordered by site id.
pub fn group_by_site(nights: &[SiteNight]) -> BTreeMap<SiteId, SiteTally> {
    let mut sites: BTreeMap<SiteId, SiteTally> = BTreeMap::new();
    for night in nights {
        sites
            .entry(night.site_id.clone())
            .or_insert_with(|| SiteTally::new(night))
            .add(night);
    }
    sites
}
