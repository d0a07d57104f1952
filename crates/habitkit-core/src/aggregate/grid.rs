//! Heatmap grid helpers.
//!
//! A year heatmap renders as week columns of 7 rows. These helpers pad a
//! date list back to the configured week start, chunk it into columns, and
//! classify each cell's shading tier.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{dates_in_range, days_from_week_start, format_date, parse_date};

/// Prepend earlier dates until the first entry falls on the configured
/// week start, so the grid's first column is full.
pub fn pad_to_week_start(dates: &[String], start_day_of_week: u8) -> Vec<String> {
    let Some(first) = dates.first().and_then(|d| parse_date(d)) else {
        return dates.to_vec();
    };
    let pad = days_from_week_start(first, start_day_of_week);

    let mut padded = Vec::with_capacity(dates.len() + pad as usize);
    for offset in (1..=u64::from(pad)).rev() {
        if let Some(day) = first.checked_sub_days(Days::new(offset)) {
            padded.push(format_date(day));
        }
    }
    padded.extend_from_slice(dates);
    padded
}

/// Chunk a chronological date list into week columns of up to 7 days.
pub fn group_by_week(dates: &[String]) -> Vec<Vec<String>> {
    dates.chunks(7).map(|week| week.to_vec()).collect()
}

/// Every local date of `year`, ascending. When `year` is `today`'s year
/// the list stops at `today` -- the heatmap never shows future cells.
pub fn dates_in_year(year: i32, today: NaiveDate) -> Vec<String> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let mut end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(start);
    if year == today.year() && today < end {
        end = today;
    }
    let count = (end - start).num_days() + 1;
    dates_in_range(end, count.max(0) as usize, true)
}

/// Month abbreviation shown above a week column when its first day lands
/// in the opening week of a month.
pub fn month_label_for_week(week: &[String]) -> Option<String> {
    let first = parse_date(week.first()?)?;
    if first.day() < 8 {
        Some(first.format("%b").to_string())
    } else {
        None
    }
}

/// Year navigation bounds: earliest history year through the current year.
pub fn year_range(dates: &[String], current_year: i32) -> (i32, i32) {
    let min_year = dates
        .iter()
        .filter_map(|d| parse_date(d))
        .map(|d| d.year())
        .min()
        .unwrap_or(current_year);
    (min_year.min(current_year), current_year)
}

/// Shading tier for a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionIntensity {
    /// Nothing recorded.
    Empty,
    /// Under half the target.
    Faint,
    /// At least half, still short of the target.
    Partial,
    /// Target met or exceeded.
    Full,
}

/// Classify a day's value against the habit target.
pub fn intensity(value: f64, target: f64) -> CompletionIntensity {
    if value <= 0.0 {
        CompletionIntensity::Empty
    } else if value < target / 2.0 {
        CompletionIntensity::Faint
    } else if value < target {
        CompletionIntensity::Partial
    } else {
        CompletionIntensity::Full
    }
}
