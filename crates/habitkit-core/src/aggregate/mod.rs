//! Calendar-bucketed aggregation for charts, progress bars, and heatmaps.

mod grid;
mod periods;
mod progress;

pub use grid::{
    dates_in_year, group_by_week, intensity, month_label_for_week, pad_to_week_start, year_range,
    CompletionIntensity,
};
pub use periods::{
    all_period_keys, period_buckets, period_key, period_label, week_label, y_axis_ticks, Grouping,
    PeriodBucket,
};
pub use progress::{period_range, progress, PeriodProgress, PeriodType};
