//! Site-night fact model and newtype wrappers for domain modeling.

use crate::error::{OccupancyError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a lodging site (one bookable inventory unit).
    SiteId
);
string_id!(
    /// Identifier of a site category.
    SiteTypeId
);
string_id!(
    /// Identifier of a reservation (one stay).
    ReservationId
);

/// Site metadata as carried by the upstream producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site identifier.
    pub id: SiteId,
    /// Display name.
    pub name: String,
    /// Category identifier.
    pub type_id: SiteTypeId,
    /// Category display name.
    pub type_name: String,
}

impl Site {
    /// Create a site record.
    pub fn new(
        id: impl Into<SiteId>,
        name: impl Into<String>,
        type_id: impl Into<SiteTypeId>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_id: type_id.into(),
            type_name: type_name.into(),
        }
    }
}

/// One site on one calendar night; the atomic fact every aggregate is built from.
///
/// `on` is 1 iff the night is occupied. `an` is 1 when the night counts toward
/// capacity under the active blocked-inventory policy. Calendar fields are
/// carried as supplied and are not recomputed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNight {
    /// Calendar night.
    pub date: NaiveDate,
    /// Site the fact belongs to.
    pub site_id: SiteId,
    /// Display name of the site.
    pub site_name: String,
    /// Category of the site.
    pub site_type_id: SiteTypeId,
    /// Display name of the category.
    pub site_type_name: String,
    /// Withheld from sale for the night.
    pub is_blocked: bool,
    /// Covered by a reservation.
    pub is_occupied: bool,
    /// Occupied indicator, 0 or 1.
    pub on: u32,
    /// Available indicator, 0 or 1.
    pub an: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    /// ISO week number as supplied by the producer.
    pub week_iso: u32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Net lodging revenue pro-rated to this night.
    pub revenue_lodging_net: f64,
    /// Friday or Saturday night.
    pub weekend_flag: bool,
    /// Stay covering the night, when occupied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ReservationId>,
}

impl SiteNight {
    /// Start building a fact for `site` on `date`.
    pub fn builder(site: &Site, date: NaiveDate) -> SiteNightBuilder {
        SiteNightBuilder::new(site, date)
    }
}

/// Builder deriving the calendar fields and indicators of a [`SiteNight`].
#[derive(Debug, Clone)]
pub struct SiteNightBuilder {
    site: Site,
    date: NaiveDate,
    blocked: bool,
    occupied: bool,
    revenue: f64,
    reservation_id: Option<ReservationId>,
}

impl SiteNightBuilder {
    fn new(site: &Site, date: NaiveDate) -> Self {
        Self {
            site: site.clone(),
            date,
            blocked: false,
            occupied: false,
            revenue: 0.0,
            reservation_id: None,
        }
    }

    /// Mark the night as covered by `reservation` with the pro-rated `revenue`.
    pub fn occupied(mut self, reservation: impl Into<ReservationId>, revenue: f64) -> Self {
        self.occupied = true;
        self.reservation_id = Some(reservation.into());
        self.revenue = revenue;
        self
    }

    /// Mark the night as administratively withheld.
    pub fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    /// Build the fact with the default policy: blocked nights are excluded from capacity.
    pub fn build(self) -> SiteNight {
        let weekday = weekday_index(self.date);
        SiteNight {
            date: self.date,
            site_id: self.site.id,
            site_name: self.site.name,
            site_type_id: self.site.type_id,
            site_type_name: self.site.type_name,
            is_blocked: self.blocked,
            is_occupied: self.occupied,
            on: u32::from(self.occupied),
            an: u32::from(!self.blocked),
            weekday,
            week_iso: self.date.iso_week().week(),
            month: self.date.month(),
            year: self.date.year(),
            revenue_lodging_net: self.revenue,
            weekend_flag: is_weekend_weekday(weekday),
            reservation_id: self.reservation_id,
        }
    }
}

/// A stay, supplied alongside the facts for average-length-of-stay only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation identifier.
    pub id: ReservationId,
    /// Booked site.
    pub site_id: SiteId,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Exclusive: the guest leaves this morning.
    pub check_out: NaiveDate,
}

impl Reservation {
    /// Create a reservation record.
    pub fn new(
        id: impl Into<ReservationId>,
        site_id: impl Into<SiteId>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            site_id: site_id.into(),
            check_in,
            check_out,
        }
    }

    /// Length of stay in whole nights.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Half-open date selection `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First selected night.
    pub start: NaiveDate,
    /// First night after the selection.
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end that precedes the start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(OccupancyError::validation_field(
                format!("range end {end} is before start {start}"),
                "date_range",
            ));
        }
        Ok(Self { start, end })
    }

    /// Range of `nights` nights beginning at `start`.
    pub fn from_nights(start: NaiveDate, nights: u32) -> Self {
        Self {
            start,
            end: start + Duration::days(i64::from(nights)),
        }
    }

    /// Whole days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `date` falls inside `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// The same range moved by `days` (negative moves back in time).
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Weekday of `date` with Sunday = 0.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..7
    date.weekday().num_days_from_sunday() as u8
}

/// Friday (5) and Saturday (6) nights are weekend nights.
pub const fn is_weekend_weekday(weekday: u8) -> bool {
    matches!(weekday, 5 | 6)
}
