//! Recency-weighted adherence score.
//!
//! The score summarizes long-run adherence as a single 0-100 number. It
//! evaluates many consecutive cadence windows walking back from the
//! reference date and blends their achievement rates with exponentially
//! decaying weights, so the most recent window dominates while every past
//! window still contributes something. Old lapses fade gradually instead of
//! dropping off a cliff, and chronic over-achievement cannot push the score
//! past 100.
//!
//! The reference date is an explicit parameter on every function. That is
//! what makes the day-by-day score series for trend charts possible: score
//! the habit once per day with history truncated to that day.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cadence::{window_accumulation, window_days};
use crate::dates::format_date;
use crate::habit::Habit;

/// Tuning parameters for the score formula.
///
/// The defaults are inherited tuned constants with no first-principles
/// derivation; callers that need to reproduce historical score values
/// exactly should pin their own copy rather than rely on these staying
/// fixed forever.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreParams {
    /// Exponential decay rate: window `i` weighs `alpha * (1 - alpha)^i`.
    pub alpha: f64,
    /// Evaluate at least this many cadence windows.
    pub min_periods: u32,
    /// Evaluate enough windows to cover roughly this many days, so
    /// long-cadence habits still get a reasonable sample.
    pub horizon_days: u32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            alpha: 0.07,
            min_periods: 12,
            horizon_days: 120,
        }
    }
}

impl ScoreParams {
    /// Number of cadence windows evaluated for a given window length.
    pub fn num_periods(&self, window_days: u32) -> u32 {
        let window = window_days.max(1);
        let to_cover_horizon = (self.horizon_days + window - 1) / window;
        self.min_periods.max(to_cover_horizon)
    }
}

/// One day of a score time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    /// Score in 0..100.
    pub value: f64,
}

/// Adherence score in [0, 100] as of `reference_date`, using default
/// parameters.
pub fn score(habit: &Habit, reference_date: NaiveDate) -> f64 {
    score_with_params(habit, reference_date, &ScoreParams::default())
}

/// Adherence score in [0, 100] as of `reference_date`.
///
/// Walks `num_periods` non-overlapping cadence windows backward from the
/// reference date. Each window's achievement rate is its accumulation
/// (completed-day count for boolean habits, quantity sum for measurable
/// ones) against `target`, clamped at 1. Empty history or a non-positive
/// target scores 0 -- a safe default, never an error.
pub fn score_with_params(habit: &Habit, reference_date: NaiveDate, params: &ScoreParams) -> f64 {
    if habit.history.is_empty() || habit.target <= 0.0 {
        return 0.0;
    }

    let window = window_days(habit);
    let num_periods = params.num_periods(window);

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut window_end = reference_date;

    for period_index in 0..num_periods {
        let weight = params.alpha * (1.0 - params.alpha).powi(period_index as i32);
        let accumulation = window_accumulation(habit, window_end);
        let achievement = (accumulation / habit.target).min(1.0);

        weighted_sum += achievement * weight;
        total_weight += weight;

        window_end = match window_end.checked_sub_days(Days::new(u64::from(window))) {
            Some(prev) => prev,
            None => break,
        };
    }

    if total_weight > 0.0 {
        (weighted_sum / total_weight * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// Day-by-day score series for trend charts, using default parameters.
pub fn score_series(habit: &Habit, dates: &[NaiveDate]) -> Vec<ScorePoint> {
    score_series_with_params(habit, dates, &ScoreParams::default())
}

/// Day-by-day score series: each point scores the habit as of that date,
/// with all later history entries masked out, so the series shows what the
/// score actually was on each day.
pub fn score_series_with_params(
    habit: &Habit,
    dates: &[NaiveDate],
    params: &ScoreParams,
) -> Vec<ScorePoint> {
    dates
        .iter()
        .map(|&date| {
            // Canonical keys sort lexicographically in date order, so a
            // range cut is a date cut.
            let cutoff = format_date(date);
            let truncated = Habit {
                history: habit
                    .history
                    .range(..=cutoff)
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
                ..habit.clone()
            };
            ScorePoint {
                date,
                value: score_with_params(&truncated, date, params),
            }
        })
        .collect()
}
