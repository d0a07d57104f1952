//! Fixed-calendar-period progress for progress-bar widgets.
//!
//! Distinct from the rolling cadence window: this sums history over the
//! current calendar week/month/quarter/year and scales the habit's
//! per-window target to the period length.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cadence::window_days;
use crate::dates::{first_of_month, last_of_month, week_start_on_or_before};
use crate::habit::{Habit, HabitKind};

/// Fixed calendar period kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Week,
    Month,
    Quarter,
    Year,
}

/// Accumulated value and scaled target for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodProgress {
    pub value: f64,
    pub target: f64,
}

/// Inclusive first and last day of the fixed calendar period containing
/// `reference`. Weeks honor the configured start day.
pub fn period_range(
    period: PeriodType,
    reference: NaiveDate,
    start_day_of_week: u8,
) -> (NaiveDate, NaiveDate) {
    match period {
        PeriodType::Week => {
            let start = week_start_on_or_before(reference, start_day_of_week);
            let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
            (start, end)
        }
        PeriodType::Month => (
            first_of_month(reference.year(), reference.month(), reference),
            last_of_month(reference.year(), reference.month()),
        ),
        PeriodType::Quarter => {
            let quarter_start_month = (reference.month() - 1) / 3 * 3 + 1;
            (
                first_of_month(reference.year(), quarter_start_month, reference),
                last_of_month(reference.year(), quarter_start_month + 2),
            )
        }
        PeriodType::Year => (
            first_of_month(reference.year(), 1, reference),
            last_of_month(reference.year(), 12),
        ),
    }
}

/// Progress against the fixed calendar period containing `reference`.
///
/// `value` sums history over every day of the period. `target` scales the
/// per-window target to the period length (`target / frequency_days *
/// days_in_period`), rounded to the nearest integer; a boolean habit's
/// target is first clamped so it never exceeds the number of days -- it
/// cannot require more than one completion per day.
pub fn progress(
    habit: &Habit,
    period: PeriodType,
    reference: NaiveDate,
    start_day_of_week: u8,
) -> PeriodProgress {
    let (start, end) = period_range(period, reference, start_day_of_week);

    let mut value = 0.0;
    let mut days = 0u32;
    let mut cursor = start;
    while cursor <= end {
        value += habit.value_on(cursor);
        days += 1;
        cursor = match cursor.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    let scaled = habit.target / f64::from(window_days(habit)) * f64::from(days);
    let target = match habit.kind {
        HabitKind::Boolean => scaled.min(f64::from(days)),
        HabitKind::Measurable => scaled,
    };

    PeriodProgress {
        value,
        target: target.round(),
    }
}
