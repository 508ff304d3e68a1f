//! Mapping between calendar dates and a leap-independent day-of-year.
//!
//! Every (month, day) pair is placed on a fixed non-leap reference year, so
//! the day index runs 1..=365 for every observed year and Feb 29 has no
//! representation. In leap years, days after Feb 28 shift down by one.

use chrono::{Datelike, NaiveDate};

/// Day-of-year on the reference year, 1..=365.
pub type Doy = u16;

/// Non-leap year used for every month/day computation in a session.
pub const REFERENCE_YEAR: i32 = 2021;

pub const FIRST_DOY: Doy = 1;
pub const LAST_DOY: Doy = 365;

/// Fixed, locale-independent month abbreviations used in labels.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Date format of the `Date` column and of `<input type="date">` values.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days in `month` on the reference year. Months outside 1..=12 are clamped.
pub fn days_in_month(month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let first = NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 31,
    }
}

/// Maps (month, day) to a day-of-year.
///
/// A day past the end of its month is clamped to the month's last day, so
/// `md_to_doy(2, 30) == md_to_doy(2, 28)` and `md_to_doy(4, 31) == md_to_doy(4, 30)`.
pub fn md_to_doy(month: u32, day: u32) -> Doy {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(month));
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|date| date.ordinal() as Doy)
        .unwrap_or(FIRST_DOY)
}

/// Inverse of [`md_to_doy`]. Out-of-range input is clamped into 1..=365.
pub fn doy_to_md(doy: Doy) -> (u32, u32) {
    let doy = doy.clamp(FIRST_DOY, LAST_DOY);
    NaiveDate::from_yo_opt(REFERENCE_YEAR, doy as u32)
        .map(|date| (date.month(), date.day()))
        .unwrap_or((1, 1))
}

/// Presentation label for a day-of-year, e.g. `"05-mar"`.
pub fn doy_label(doy: Doy) -> String {
    let (month, day) = doy_to_md(doy);
    format!("{:02}-{}", day, MONTH_ABBREVIATIONS[(month - 1) as usize])
}

/// Day-of-year of the first day of every month.
pub fn month_start_doys() -> [Doy; 12] {
    let mut starts = [FIRST_DOY; 12];
    for (i, start) in starts.iter_mut().enumerate() {
        *start = md_to_doy(i as u32 + 1, 1);
    }
    starts
}

/// Leap-independent day-of-year of a real calendar date. Feb 29 yields `None`.
pub fn doy365_from_date(date: NaiveDate) -> Option<Doy> {
    if date.month() == 2 && date.day() == 29 {
        return None;
    }
    let ordinal = date.ordinal();
    let is_leap = NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some();
    if is_leap && ordinal > 59 {
        Some((ordinal - 1) as Doy)
    } else {
        Some(ordinal as Doy)
    }
}

/// Converts a 1..=366 ordinal within `year` to the leap-independent day-of-year.
pub fn doy365_from_doy366(year: i32, doy366: u32) -> Option<Doy> {
    NaiveDate::from_yo_opt(year, doy366).and_then(doy365_from_date)
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT).ok()
}
