//! Rolling cadence windows and on-pace evaluation.
//!
//! A habit's completion contract: accumulate at least `target` within every
//! rolling window of `frequency_days` consecutive calendar days ending on
//! the evaluation date. Boolean habits accumulate completed days, measurable
//! habits accumulate recorded quantities. The same window semantics drive
//! the score engine in [`crate::stats`].

use chrono::{Days, NaiveDate};

use crate::habit::{Habit, HabitKind};

/// Cadence window length in days, clamped to at least one day so a
/// zero-frequency record can never divide by zero or stall a scan.
pub fn window_days(habit: &Habit) -> u32 {
    habit.frequency_days.max(1)
}

/// Accumulated completion over the window ending at `end` (inclusive).
///
/// O(`frequency_days`) scan; missing history entries read as 0.
pub fn window_accumulation(habit: &Habit, end: NaiveDate) -> f64 {
    let days = window_days(habit);
    let mut total = 0.0;
    for offset in 0..days {
        let Some(day) = end.checked_sub_days(Days::new(u64::from(offset))) else {
            break;
        };
        let value = habit.value_on(day);
        total += match habit.kind {
            HabitKind::Boolean => {
                if value > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            HabitKind::Measurable => value,
        };
    }
    total
}

/// Whether the habit is on pace as of `date`: the cadence window ending at
/// `date` has accumulated at least `target`.
pub fn is_satisfied_on(habit: &Habit, date: NaiveDate) -> bool {
    window_accumulation(habit, date) >= habit.target
}
