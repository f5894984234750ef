//! Numeric normalization applied at every input boundary.

/// Return `value` if it is present and finite, otherwise `default`.
///
/// This is the single place where "missing" and "not a number" are turned
/// into a concrete value, so callers never mix the two with a real zero.
#[must_use]
pub fn to_finite_number(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Round half away from zero to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
