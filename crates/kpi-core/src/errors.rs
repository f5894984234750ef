//! Cross-cutting error types for the KPI engine.
//!
//! Scoring itself never fails: bad data is defined away as default values.
//! These errors only surface at the input boundary, where callers opt into
//! strict validation. Configuration errors live in `kpi-config`.

use thiserror::Error;

/// Errors raised while validating records handed to the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two check-ins share the same (month, year) pair.
    #[error("Duplicate measurement for {year}-{month:02}")]
    DuplicateMeasurement { month: u8, year: i32 },

    /// A month number outside `1..=12`.
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u8),
}
