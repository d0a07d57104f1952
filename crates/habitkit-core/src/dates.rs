//! Local calendar utilities.
//!
//! Dates are plain [`NaiveDate`] values and their canonical string form is
//! zero-padded `YYYY-MM-DD` built from calendar fields. Nothing in this
//! module round-trips through UTC, so a user west of UTC at 23:00 gets the
//! same date their wall clock shows.

use chrono::{Datelike, Days, Local, NaiveDate};

/// Canonical date string format used for history keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as a zero-padded `YYYY-MM-DD` string.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a canonical `YYYY-MM-DD` string back into a date.
///
/// Returns `None` on malformed input. History keys are produced by
/// [`format_date`], so a `None` here means the record was tampered with;
/// callers skip such entries rather than fail.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Today according to the local wall clock.
///
/// The only clock access in the crate. Engine functions take their
/// reference date as a parameter; this exists for the outermost caller.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// [`today_local`] as a canonical date string.
pub fn today_local_string() -> String {
    format_date(today_local())
}

/// Exactly `count` consecutive calendar dates, walking backward one day at
/// a time from `start` (so `start` is the most recent entry). `reverse`
/// returns them chronologically ascending instead.
pub fn dates_in_range(start: NaiveDate, count: usize, reverse: bool) -> Vec<String> {
    let mut dates = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        dates.push(format_date(current));
        current = match current.checked_sub_days(Days::new(1)) {
            Some(prev) => prev,
            None => break,
        };
    }
    if reverse {
        dates.reverse();
    }
    dates
}

/// Days elapsed since the most recent occurrence of the configured week
/// start (0 = Sunday .. 6 = Saturday). 0 when `date` itself is a week start.
pub fn days_from_week_start(date: NaiveDate, start_day_of_week: u8) -> u32 {
    let start = u32::from(start_day_of_week % 7);
    (date.weekday().num_days_from_sunday() + 7 - start) % 7
}

/// Most recent occurrence of the configured week-start weekday on or
/// before `date`.
pub fn week_start_on_or_before(date: NaiveDate, start_day_of_week: u8) -> NaiveDate {
    let offset = days_from_week_start(date, start_day_of_week);
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(date)
}

/// First day of `year`'s month `month`, degrading to `fallback` when the
/// pair is out of chrono's range.
pub(crate) fn first_of_month(year: i32, month: u32, fallback: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(fallback)
}

/// Last day of `year`'s month `month`.
pub(crate) fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(NaiveDate::MAX)
}
