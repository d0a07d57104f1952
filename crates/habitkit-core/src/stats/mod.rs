//! Habit analytics: streaks, adherence scores, and the overview bundle.
//!
//! Everything here is a pure transform of a habit snapshot plus an explicit
//! reference date. Streaks look at raw daily presence; the score evaluates
//! cadence-window adherence with recency weighting.

mod overview;
mod score;
mod streak;

pub use overview::{
    overview_stats, recent_activity, total_completions, DayActivity, OverviewStats,
    RECENT_ACTIVITY_DAYS,
};
pub use score::{
    score, score_series, score_series_with_params, score_with_params, ScoreParams, ScorePoint,
};
pub use streak::{current_streak, longest_streak, streaks, StreakStats};
