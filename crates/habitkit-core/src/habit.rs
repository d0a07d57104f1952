//! Habit and settings snapshot types shared with the external store.
//!
//! The store owns these records and their lifecycle; the engine borrows a
//! read-only snapshot for the duration of one computation. Serde renames
//! match the persisted JSON, and fields added after the first release carry
//! defaults so old records still deserialize.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{format_date, parse_date, today_local_string};
use crate::error::ValidationError;

/// Sparse per-date completion record: `YYYY-MM-DD` key to recorded value.
/// A missing key means 0.
pub type History = BTreeMap<String, f64>;

/// What a habit tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Presence/absence tracking; a day counts when its value is positive.
    Boolean,
    /// Quantity tracking; daily values are summed toward the target.
    Measurable,
}

/// A habit snapshot as persisted by the external store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Opaque stable identifier.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    /// Amount required per cadence window: a completion count for boolean
    /// habits, a summed quantity for measurable ones.
    #[serde(default)]
    pub target: f64,
    /// Display unit for measurable habits ("km", "minutes"); never used in
    /// computation.
    #[serde(default)]
    pub unit: Option<String>,
    /// Length of the rolling cadence window in days. The store populates
    /// this at creation time; it is never defaulted here.
    pub frequency_days: u32,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub color: String,
    /// List position; records predating this field deserialize to 0 and the
    /// store re-indexes them by array position at load time.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Value recorded in `history` on `date`; missing entries read as 0.
///
/// Every component reads history through this accessor (or
/// [`value_for_key`]) so the missing-means-zero invariant lives in one
/// place.
pub fn value_on(history: &History, date: NaiveDate) -> f64 {
    value_for_key(history, &format_date(date))
}

/// [`value_on`] for callers already holding a canonical date string.
pub fn value_for_key(history: &History, key: &str) -> f64 {
    history.get(key).copied().unwrap_or(0.0)
}

/// Whether `history` marks `date` as completed (any positive value).
pub fn completed_on(history: &History, date: NaiveDate) -> bool {
    value_on(history, date) > 0.0
}

impl Habit {
    /// Convenience constructor for newly created habits. The store assigns
    /// `order` on insert.
    pub fn new(name: impl Into<String>, kind: HabitKind, target: f64, frequency_days: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            kind,
            target,
            unit: None,
            frequency_days,
            history: History::new(),
            color: String::new(),
            order: 0,
            is_archived: false,
            created_at: today_local_string(),
        }
    }

    /// Replace the history record.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Value recorded on `date`, treating missing entries as 0.
    pub fn value_on(&self, date: NaiveDate) -> f64 {
        value_on(&self.history, date)
    }

    /// Whether `date` is completed (any positive value).
    pub fn completed_on(&self, date: NaiveDate) -> bool {
        completed_on(&self.history, date)
    }

    /// Check the snapshot against the store contract.
    ///
    /// The analytics functions clamp these violations silently; this is for
    /// the store to run before persisting a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.frequency_days == 0 {
            return Err(ValidationError::InvalidValue {
                field: "frequencyDays".into(),
                message: "must be at least 1".into(),
            });
        }
        if !self.target.is_finite() || self.target < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "target".into(),
                message: format!("must be a non-negative number, got {}", self.target),
            });
        }
        for (key, value) in &self.history {
            if parse_date(key).is_none() {
                return Err(ValidationError::MalformedDate(key.clone()));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: "history".into(),
                    message: format!("value on {key} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User settings persisted alongside the habit records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// First day of the week: 0 = Sunday .. 6 = Saturday.
    #[serde(default)]
    pub start_day_of_week: u8,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications_enabled: true,
            start_day_of_week: 0,
        }
    }
}

impl Settings {
    /// Check the snapshot against the store contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_day_of_week > 6 {
            return Err(ValidationError::InvalidValue {
                field: "startDayOfWeek".into(),
                message: format!("must be 0-6, got {}", self.start_day_of_week),
            });
        }
        Ok(())
    }
}
