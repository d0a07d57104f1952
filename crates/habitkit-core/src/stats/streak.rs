//! Consecutive-completion streaks.
//!
//! Streaks are about raw daily presence: a day counts when its recorded
//! value is positive, independent of `target` and `frequency_days`. This is
//! deliberately simpler than cadence satisfaction -- a weekly habit still
//! shows the literal run of days the user checked in.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::habit::{completed_on, History};

/// Current and longest consecutive-completion runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current: u32,
    pub longest: u32,
}

/// Length of the streak ending at (or just before) `today`.
///
/// Walks backward one day at a time counting positive values. An
/// incomplete `today` does not reset a streak that was alive as of
/// yesterday -- the user may simply not have checked in yet.
pub fn current_streak(history: &History, today: NaiveDate) -> u32 {
    if history.is_empty() {
        return 0;
    }

    let mut cursor = today;
    if !completed_on(history, cursor) {
        let Some(yesterday) = cursor.checked_sub_days(Days::new(1)) else {
            return 0;
        };
        if !completed_on(history, yesterday) {
            return 0;
        }
        cursor = yesterday;
    }

    let mut streak = 0u32;
    while completed_on(history, cursor) {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of chronologically consecutive completed days anywhere in
/// the history. 0 for an empty history, 1 for a single completed date.
pub fn longest_streak(history: &History) -> u32 {
    let mut completed: Vec<NaiveDate> = history
        .iter()
        .filter(|(_, value)| **value > 0.0)
        .filter_map(|(key, _)| parse_date(key))
        .collect();
    completed.sort_unstable();

    if completed.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in completed.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Both streak figures in one pass-friendly bundle.
pub fn streaks(history: &History, today: NaiveDate) -> StreakStats {
    StreakStats {
        current: current_streak(history, today),
        longest: longest_streak(history),
    }
}
