//! Calendar-period bucketing for time-series charts.
//!
//! Buckets sparse history into week, month, quarter, or year series. The
//! key range is always contiguous from the earliest history date through
//! today (or the latest entry, whichever is later): a bucket with zero
//! activity still appears, otherwise the chart silently hides the gaps.
//!
//! Week numbering honors the user's configured week start: week 1 of a
//! year begins on the first occurrence of that weekday on or after Jan 1,
//! and days before it belong to the final week of the previous year.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{first_of_month, parse_date, week_start_on_or_before};
use crate::habit::Habit;

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    Week,
    Month,
    Quarter,
    Year,
}

/// One chart bucket, ordered by calendar time ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Chart-facing label.
    pub period: String,
    /// Summed history values for the bucket.
    pub completions: f64,
    /// Stable bucket key, e.g. `2024-W23`, `2024-06`, `2024-Q2`, `2024`.
    pub key: String,
}

/// Start of the first week of `year`: the first occurrence of the
/// configured week-start weekday on or after Jan 1.
fn first_week_start(year: i32, start_day_of_week: u8) -> NaiveDate {
    let jan1 = first_of_month(year, 1, NaiveDate::MIN);
    let start = u32::from(start_day_of_week % 7);
    let offset = (start + 7 - jan1.weekday().num_days_from_sunday()) % 7;
    jan1.checked_add_days(Days::new(u64::from(offset))).unwrap_or(jan1)
}

/// Week bucket containing `date`: the owning year and the 1-based week
/// index within it.
fn week_of(date: NaiveDate, start_day_of_week: u8) -> (i32, u32) {
    let mut year = date.year();
    let mut first = first_week_start(year, start_day_of_week);
    if date < first {
        year -= 1;
        first = first_week_start(year, start_day_of_week);
    }
    let week = ((date - first).num_days() / 7) as u32 + 1;
    (year, week)
}

/// First calendar day of a week bucket.
fn week_bucket_start(year: i32, week: u32, start_day_of_week: u8) -> NaiveDate {
    let first = first_week_start(year, start_day_of_week);
    first
        .checked_add_days(Days::new(u64::from(week.saturating_sub(1)) * 7))
        .unwrap_or(first)
}

fn parse_week_key(key: &str) -> Option<(i32, u32)> {
    let (year, week) = key.split_once("-W")?;
    Some((year.parse().ok()?, week.parse().ok()?))
}

/// Bucket key for `date` under the given granularity.
pub fn period_key(date: NaiveDate, grouping: Grouping, start_day_of_week: u8) -> String {
    match grouping {
        Grouping::Week => {
            let (year, week) = week_of(date, start_day_of_week);
            format!("{year}-W{week}")
        }
        Grouping::Month => format!("{}-{:02}", date.year(), date.month()),
        Grouping::Quarter => format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
        Grouping::Year => date.year().to_string(),
    }
}

/// Human-readable label for a non-week bucket key.
pub fn period_label(key: &str, grouping: Grouping) -> String {
    match grouping {
        Grouping::Month => match parse_date(&format!("{key}-01")) {
            Some(first) => format!("{} {}", first.year(), first.format("%b")),
            None => key.to_string(),
        },
        Grouping::Week | Grouping::Quarter => key.replacen('-', " ", 1),
        Grouping::Year => key.to_string(),
    }
}

/// Week-axis label: month abbreviation plus two-digit year on the first
/// bucket and whenever the bucket crosses into a new month or year,
/// otherwise just the week-start day of month. Keeps a dense week axis
/// from repeating the month on every tick.
pub fn week_label(key: &str, prev_key: Option<&str>, start_day_of_week: u8) -> String {
    let Some((year, week)) = parse_week_key(key) else {
        return key.to_string();
    };
    let first_day = week_bucket_start(year, week, start_day_of_week);
    let month_year = first_day.format("%b '%y").to_string();

    let Some((prev_year, prev_week)) = prev_key.and_then(parse_week_key) else {
        return month_year;
    };
    let prev_day = week_bucket_start(prev_year, prev_week, start_day_of_week);

    if first_day.month() != prev_day.month() || first_day.year() != prev_day.year() {
        month_year
    } else {
        first_day.day().to_string()
    }
}

/// Contiguous bucket keys from the earliest history date through
/// `max(today, latest history date)`. Empty history yields no keys.
pub fn all_period_keys(
    habit: &Habit,
    grouping: Grouping,
    start_day_of_week: u8,
    today: NaiveDate,
) -> Vec<String> {
    let mut dates = habit.history.keys().filter_map(|k| parse_date(k));
    let Some(first) = dates.next() else {
        return Vec::new();
    };
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    let end = max.max(today);

    match grouping {
        Grouping::Week => weekly_keys(min, end, start_day_of_week),
        Grouping::Month => monthly_keys(min, end),
        Grouping::Quarter => quarterly_keys(min, end),
        Grouping::Year => yearly_keys(min, end),
    }
}

fn weekly_keys(start: NaiveDate, end: NaiveDate, start_day_of_week: u8) -> Vec<String> {
    let mut keys = Vec::new();
    let mut cursor = week_start_on_or_before(start, start_day_of_week);
    while cursor <= end {
        keys.push(period_key(cursor, Grouping::Week, start_day_of_week));
        cursor = match cursor.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    keys
}

fn monthly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut keys = Vec::new();
    let mut year = start.year();
    let mut month = start.month();
    loop {
        let first = first_of_month(year, month, NaiveDate::MAX);
        if first > end {
            break;
        }
        keys.push(period_key(first, Grouping::Month, 0));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    keys
}

fn quarterly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut keys = Vec::new();
    let mut year = start.year();
    let mut month = (start.month() - 1) / 3 * 3 + 1;
    loop {
        let first = first_of_month(year, month, NaiveDate::MAX);
        if first > end {
            break;
        }
        keys.push(period_key(first, Grouping::Quarter, 0));
        month += 3;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    keys
}

fn yearly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    (start.year()..=end.year()).map(|y| y.to_string()).collect()
}

/// Bucketed history for chart rendering: every key in the contiguous range
/// with its summed completions and display label, ascending.
pub fn period_buckets(
    habit: &Habit,
    grouping: Grouping,
    start_day_of_week: u8,
    today: NaiveDate,
) -> Vec<PeriodBucket> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (key, value) in &habit.history {
        let Some(date) = parse_date(key) else {
            continue;
        };
        *totals
            .entry(period_key(date, grouping, start_day_of_week))
            .or_insert(0.0) += value;
    }

    let keys = all_period_keys(habit, grouping, start_day_of_week, today);
    keys.iter()
        .enumerate()
        .map(|(idx, key)| {
            let label = match grouping {
                Grouping::Week => week_label(
                    key,
                    idx.checked_sub(1).map(|prev| keys[prev].as_str()),
                    start_day_of_week,
                ),
                _ => period_label(key, grouping),
            };
            PeriodBucket {
                period: label,
                completions: totals.get(key).copied().unwrap_or(0.0),
                key: key.clone(),
            }
        })
        .collect()
}

/// Descending, evenly spaced y-axis tick values for a bucket chart: at
/// most five intervals, fewer when the maximum total is small.
pub fn y_axis_ticks(buckets: &[PeriodBucket]) -> Vec<f64> {
    let max = buckets.iter().fold(0.0f64, |m, b| m.max(b.completions));
    let intervals = if max <= 5.0 { max.round() as u32 } else { 5 };
    if intervals == 0 {
        return vec![0.0];
    }
    (0..=intervals)
        .map(|i| (max / f64::from(intervals) * f64::from(intervals - i)).round())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{HabitKind, History};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(entries: &[(&str, f64)]) -> Habit {
        let history: History = entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Habit::new("test", HabitKind::Boolean, 1.0, 1).with_history(history)
    }

    #[test]
    fn test_period_keys_per_granularity() {
        let d = date(2024, 6, 10);
        assert_eq!(period_key(d, Grouping::Month, 0), "2024-06");
        assert_eq!(period_key(d, Grouping::Quarter, 0), "2024-Q2");
        assert_eq!(period_key(d, Grouping::Year, 0), "2024");
    }

    #[test]
    fn test_week_numbering_starts_at_first_occurrence_of_week_start() {
        // 2024-01-01 is a Monday.
        assert_eq!(first_week_start(2024, 1), date(2024, 1, 1));
        assert_eq!(period_key(date(2024, 1, 1), Grouping::Week, 1), "2024-W1");
        assert_eq!(period_key(date(2024, 1, 7), Grouping::Week, 1), "2024-W1");
        assert_eq!(period_key(date(2024, 1, 8), Grouping::Week, 1), "2024-W2");

        // With a Sunday start the first week of 2024 begins Jan 7; Jan 1-6
        // spill into the last week of 2023.
        assert_eq!(first_week_start(2024, 0), date(2024, 1, 7));
        assert_eq!(period_key(date(2024, 1, 7), Grouping::Week, 0), "2024-W1");
        assert_eq!(period_key(date(2024, 1, 6), Grouping::Week, 0), "2023-W53");
    }

    #[test]
    fn test_week_of_year_boundary_belongs_to_previous_year() {
        // Monday start: 2023-01-01 is a Sunday, before the first Monday of
        // 2023, so it falls in the final week of 2022.
        let (year, week) = week_of(date(2023, 1, 1), 1);
        assert_eq!(year, 2022);
        assert_eq!(week, 52);
    }

    #[test]
    fn test_weekly_keys_are_contiguous_over_sparse_history() {
        // Two entries ~3 months apart, nothing in between.
        let habit = habit(&[("2024-03-05", 1.0), ("2024-06-01", 1.0)]);
        let keys = all_period_keys(&habit, Grouping::Week, 1, date(2024, 6, 1));

        let expected_weeks = {
            let start = week_start_on_or_before(date(2024, 3, 5), 1);
            let end = week_start_on_or_before(date(2024, 6, 1), 1);
            (end - start).num_days() / 7 + 1
        };
        assert_eq!(keys.len() as i64, expected_weeks);

        // Contiguous: consecutive keys are consecutive weeks.
        for pair in keys.windows(2) {
            let a = parse_week_key(&pair[0]).unwrap();
            let b = parse_week_key(&pair[1]).unwrap();
            let step_within_year = a.0 == b.0 && b.1 == a.1 + 1;
            let year_rollover = b.0 == a.0 + 1 && b.1 == 1;
            assert!(step_within_year || year_rollover, "gap between {pair:?}");
        }
    }

    #[test]
    fn test_monthly_keys_fill_gaps() {
        let habit = habit(&[("2024-01-15", 1.0), ("2024-04-02", 1.0)]);
        let keys = all_period_keys(&habit, Grouping::Month, 0, date(2024, 4, 2));
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
    }

    #[test]
    fn test_quarterly_keys_cross_year() {
        let habit = habit(&[("2023-11-01", 1.0)]);
        let keys = all_period_keys(&habit, Grouping::Quarter, 0, date(2024, 5, 1));
        assert_eq!(keys, vec!["2023-Q4", "2024-Q1", "2024-Q2"]);
    }

    #[test]
    fn test_yearly_keys_span_inclusive() {
        let habit = habit(&[("2022-06-01", 1.0)]);
        let keys = all_period_keys(&habit, Grouping::Year, 0, date(2024, 1, 1));
        assert_eq!(keys, vec!["2022", "2023", "2024"]);
    }

    #[test]
    fn test_all_period_keys_empty_history() {
        let habit = habit(&[]);
        assert!(all_period_keys(&habit, Grouping::Week, 0, date(2024, 6, 1)).is_empty());
    }

    #[test]
    fn test_range_extends_to_today_beyond_latest_entry() {
        let habit = habit(&[("2024-01-10", 1.0)]);
        let keys = all_period_keys(&habit, Grouping::Month, 0, date(2024, 3, 15));
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_period_buckets_sum_and_gap_fill() {
        let habit = habit(&[
            ("2024-01-10", 2.0),
            ("2024-01-20", 1.0),
            ("2024-03-05", 4.0),
        ]);
        let buckets = period_buckets(&habit, Grouping::Month, 0, date(2024, 3, 5));

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].key, "2024-01");
        assert_eq!(buckets[0].completions, 3.0);
        assert_eq!(buckets[1].completions, 0.0);
        assert_eq!(buckets[2].completions, 4.0);
        assert_eq!(buckets[0].period, "2024 Jan");
    }

    #[test]
    fn test_week_label_shows_month_on_first_and_crossings() {
        // Monday start; weeks of 2024-06-03, 06-10, ... 07-01.
        let habit = habit(&[("2024-06-03", 1.0)]);
        let buckets = period_buckets(&habit, Grouping::Week, 1, date(2024, 7, 1));

        assert_eq!(buckets[0].period, "Jun '24");
        assert_eq!(buckets[1].period, "10");
        assert_eq!(buckets[2].period, "17");
        assert_eq!(buckets[3].period, "24");
        assert_eq!(buckets[4].period, "Jul '24");
    }

    #[test]
    fn test_quarter_and_year_labels() {
        assert_eq!(period_label("2024-Q2", Grouping::Quarter), "2024 Q2");
        assert_eq!(period_label("2024", Grouping::Year), "2024");
        assert_eq!(period_label("2024-06", Grouping::Month), "2024 Jun");
    }

    #[test]
    fn test_y_axis_ticks_small_max() {
        let buckets = vec![
            PeriodBucket {
                period: "a".into(),
                completions: 3.0,
                key: "a".into(),
            },
            PeriodBucket {
                period: "b".into(),
                completions: 1.0,
                key: "b".into(),
            },
        ];
        assert_eq!(y_axis_ticks(&buckets), vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_y_axis_ticks_large_max_uses_five_intervals() {
        let buckets = vec![PeriodBucket {
            period: "a".into(),
            completions: 100.0,
            key: "a".into(),
        }];
        assert_eq!(y_axis_ticks(&buckets), vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
    }

    #[test]
    fn test_y_axis_ticks_empty_chart() {
        assert_eq!(y_axis_ticks(&[]), vec![0.0]);
    }
}
