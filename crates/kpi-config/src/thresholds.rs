//! Default threshold ratios applied when a measurable leaves `thresholdMin` or
//! `thresholdMax` unset.

use kpi_core::ThresholdRatios;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_min_ratio() -> f64 {
    ThresholdRatios::DEFAULT_MIN_RATIO
}

const fn default_max_ratio() -> f64 {
    ThresholdRatios::DEFAULT_MAX_RATIO
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// Fraction of the target that scores 80 (the worst acceptable value).
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,

    /// Fraction of the target that reaches the 120 cap.
    #[serde(default = "default_max_ratio")]
    pub max_ratio: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_ratio: default_min_ratio(),
            max_ratio: default_max_ratio(),
        }
    }
}

impl ThresholdConfig {
    /// Check `0 < min_ratio <= 1 <= max_ratio` and return the engine ratios.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<ThresholdRatios, ConfigError> {
        if !self.min_ratio.is_finite() || self.min_ratio <= 0.0 || self.min_ratio > 1.0 {
            return Err(ConfigError::invalid(
                "thresholds.min_ratio",
                format!("must be in (0, 1], got {}", self.min_ratio),
            ));
        }
        if !self.max_ratio.is_finite() || self.max_ratio < 1.0 {
            return Err(ConfigError::invalid(
                "thresholds.max_ratio",
                format!("must be finite and at least 1, got {}", self.max_ratio),
            ));
        }
        Ok(ThresholdRatios {
            min_ratio: self.min_ratio,
            max_ratio: self.max_ratio,
        })
    }
}
