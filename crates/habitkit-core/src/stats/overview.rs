//! Overview statistics bundle for the habit detail view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::dates_in_range;
use crate::habit::{value_for_key, Habit, History};
use crate::stats::score::score;
use crate::stats::streak::{current_streak, longest_streak};

/// Days of history shown in the recent-activity strip.
pub const RECENT_ACTIVITY_DAYS: usize = 30;

/// One day of recent activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: String,
    pub value: f64,
    pub completed: bool,
}

/// Everything the overview card renders, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub score: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: f64,
    pub recent_activity: Vec<DayActivity>,
}

/// Sum of all recorded values across the entire history.
pub fn total_completions(history: &History) -> f64 {
    history.values().sum()
}

/// Per-day activity for the trailing `days`-day window ending at `today`,
/// chronologically ascending.
pub fn recent_activity(history: &History, today: NaiveDate, days: usize) -> Vec<DayActivity> {
    dates_in_range(today, days, true)
        .into_iter()
        .map(|date| {
            let value = value_for_key(history, &date);
            DayActivity {
                date,
                value,
                completed: value > 0.0,
            }
        })
        .collect()
}

/// Overview statistics for a habit as of `today`.
pub fn overview_stats(habit: &Habit, today: NaiveDate) -> OverviewStats {
    OverviewStats {
        score: score(habit, today),
        current_streak: current_streak(&habit.history, today),
        longest_streak: longest_streak(&habit.history),
        total_completions: total_completions(&habit.history),
        recent_activity: recent_activity(&habit.history, today, RECENT_ACTIVITY_DAYS),
    }
}
