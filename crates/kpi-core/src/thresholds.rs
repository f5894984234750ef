//! Threshold defaults: where the 80% / 120% rule is defined.

use serde::{Deserialize, Serialize};

/// Multipliers applied to the target when a measurable leaves
/// `thresholdMin` / `thresholdMax` unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRatios {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl ThresholdRatios {
    pub const DEFAULT_MIN_RATIO: f64 = 0.8;
    pub const DEFAULT_MAX_RATIO: f64 = 1.2;
}

impl Default for ThresholdRatios {
    fn default() -> Self {
        Self {
            min_ratio: Self::DEFAULT_MIN_RATIO,
            max_ratio: Self::DEFAULT_MAX_RATIO,
        }
    }
}

/// Resolved scoring boundaries for one measurable.
///
/// `min <= target <= max` is expected but never enforced. For inverse
/// measurables the same values are read in the opposite direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl Thresholds {
    /// Move the target to `new_target`, scaling `min` and `max` by the same factor.
    #[must_use]
    pub fn scaled_to(self, new_target: f64) -> Self {
        if self.target == 0.0 {
            return Self {
                min: 0.0,
                target: new_target,
                max: 0.0,
            };
        }
        let factor = new_target / self.target;
        Self {
            min: self.min * factor,
            target: new_target,
            max: self.max * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratios() {
        let ratios = ThresholdRatios::default();
        assert!((ratios.min_ratio - 0.8).abs() < f64::EPSILON);
        assert!((ratios.max_ratio - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn scaling_keeps_proportions() {
        let t = Thresholds {
            min: 80.0,
            target: 100.0,
            max: 120.0,
        };
        let scaled = t.scaled_to(25.0);
        assert!((scaled.min - 20.0).abs() < 1e-9);
        assert!((scaled.target - 25.0).abs() < 1e-9);
        assert!((scaled.max - 30.0).abs() < 1e-9);
    }
}
