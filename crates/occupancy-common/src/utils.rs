//! Calendar and display helpers shared by the engine and its presenters.

use chrono::{Duration, NaiveDate};

const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const MONTH_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTH_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday name for `dow` (0 = Sunday). Out-of-range values yield an empty string.
pub fn weekday_name(dow: u8, short: bool) -> &'static str {
    let names = if short { &WEEKDAY_SHORT } else { &WEEKDAY_LONG };
    names.get(usize::from(dow)).copied().unwrap_or("")
}

/// Month name for `month` (1 = January). Out-of-range values yield an empty string.
pub fn month_name(month: u32, short: bool) -> &'static str {
    let names = if short { &MONTH_SHORT } else { &MONTH_LONG };
    month
        .checked_sub(1)
        .and_then(|index| names.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// First and last calendar day of a month, or `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next - Duration::days(1)))
}

/// Header text such as `Feb 1 – Mar 3, 2025 (30 nights)`.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    let nights = (end - start).num_days();
    format!(
        "{} \u{2013} {} ({} nights)",
        start.format("%b %-d"),
        end.format("%b %-d, %Y"),
        nights
    )
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
