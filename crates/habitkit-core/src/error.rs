//! Error types for the store-facing boundary.
//!
//! Analytics functions never fail: malformed or degenerate inputs degrade
//! to a safe default (0, empty) so a chart can never crash the view that
//! renders it. Validation errors exist only for the external store to run
//! before persisting a record.

use thiserror::Error;

/// Validation errors reported by [`Habit::validate`](crate::Habit::validate)
/// and [`Settings::validate`](crate::Settings::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field holds a value outside its contract
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A history key is not a canonical `YYYY-MM-DD` date string
    #[error("Malformed history date '{0}' (expected YYYY-MM-DD)")]
    MalformedDate(String),
}

/// Result type alias for ValidationError
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
