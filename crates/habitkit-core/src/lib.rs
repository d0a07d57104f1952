//! # Habitkit Core Library
//!
//! This library provides the analytics engine for the Habitkit habit
//! tracker. The UI (lists, forms, calendars, charts) is a thin view layer
//! over this crate: every number it renders -- adherence scores, streaks,
//! on-pace flags, chart buckets, heatmap cells -- comes from a pure
//! function here.
//!
//! ## Architecture
//!
//! - **Habit snapshots**: read-only records handed in by the external
//!   store; the engine never mutates a history, it only reads one snapshot
//!   per computation
//! - **Cadence**: a habit's contract is a rolling `frequency_days`-day
//!   window that must accumulate `target`
//! - **Stats**: streak runs, the recency-weighted 0-100 adherence score,
//!   and the overview bundle
//! - **Aggregate**: gap-free week/month/quarter/year chart buckets,
//!   fixed-calendar-period progress, and heatmap grid helpers
//!
//! Every engine function takes its reference date explicitly, so results
//! are deterministic, unit-testable, and a score can be recomputed as of
//! any historical day for trend charts. Only [`dates::today_local`]
//! touches the clock, for the outermost caller's convenience.
//!
//! ## Key Components
//!
//! - [`Habit`] / [`Settings`]: snapshot types shared with the store
//! - [`is_satisfied_on`]: on-pace evaluation for any date
//! - [`score`] / [`score_series`]: exponentially recency-weighted adherence
//! - [`streaks`]: current and longest consecutive-completion runs
//! - [`period_buckets`]: gap-free period series for charts

pub mod aggregate;
pub mod cadence;
pub mod dates;
pub mod error;
pub mod habit;
pub mod stats;

pub use aggregate::{
    all_period_keys, dates_in_year, group_by_week, intensity, month_label_for_week,
    pad_to_week_start, period_buckets, period_key, period_label, period_range, progress,
    week_label, y_axis_ticks, year_range, CompletionIntensity, Grouping, PeriodBucket,
    PeriodProgress, PeriodType,
};
pub use cadence::{is_satisfied_on, window_accumulation, window_days};
pub use dates::{
    dates_in_range, format_date, parse_date, today_local, today_local_string, DATE_FORMAT,
};
pub use error::ValidationError;
pub use habit::{completed_on, value_for_key, value_on, Habit, HabitKind, History, Settings, Theme};
pub use stats::{
    current_streak, longest_streak, overview_stats, recent_activity, score, score_series,
    score_series_with_params, score_with_params, streaks, total_completions, DayActivity,
    OverviewStats, ScoreParams, ScorePoint, StreakStats,
};
