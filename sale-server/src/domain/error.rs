//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from API/IO errors.

use chrono::NaiveTime;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range, or not finite
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: &'static str },

    /// Sale hours where the end does not come after the start
    #[error("sale hours must end after they start: {start} to {end}")]
    InvalidSaleHours { start: NaiveTime, end: NaiveTime },

    /// A required text field was empty or whitespace
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Listing status string not recognised
    #[error("unrecognised listing status: {0}")]
    UnknownStatus(String),

    /// A time-of-day string that is not HH:MM
    #[error("invalid time of day: {0}")]
    BadTimeOfDay(String),
}
