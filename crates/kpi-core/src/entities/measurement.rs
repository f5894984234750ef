use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::numeric::to_finite_number;

/// One periodic check-in. A missing, non-numeric, or non-finite `value` still
/// counts as a check-in and contributes `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Measurement {
    pub month: u8,
    pub year: i32,
    #[serde(default, deserialize_with = "super::lenient::number")]
    #[schemars(with = "Option<f64>")]
    pub value: Option<f64>,
}

impl Measurement {
    #[must_use]
    pub const fn new(month: u8, year: i32, value: f64) -> Self {
        Self {
            month,
            year,
            value: Some(value),
        }
    }

    /// The check-in value, coerced to `0` when missing.
    #[must_use]
    pub fn value_or_zero(&self) -> f64 {
        to_finite_number(self.value, 0.0)
    }
}
