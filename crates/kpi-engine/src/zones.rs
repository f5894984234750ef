//! Score zone mapping: piecewise-linear 0-120 scores from a value and its thresholds.
//!
//! ```text
//!   score
//!    120 ┤                    ┌──────────
//!    100 ┤            ┌──────╱
//!     80 ┤     ┌─────╱
//!      0 ┼─────┘
//!        └─────┴──────┴──────┴────────── value (normal mode)
//!             min   target   max
//! ```
//!
//! In inverse mode the same bands are walked from high to low values: the
//! upper bound becomes the worst boundary and the lower bound the best.

use std::fmt;

use kpi_core::numeric::to_finite_number;
use kpi_core::{Measurable, ThresholdRatios, Thresholds};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: f64 = 120.0;
pub const TARGET_SCORE: f64 = 100.0;
pub const MIN_ZONE_SCORE: f64 = 80.0;

const BAND_WIDTH: f64 = 20.0;

/// Resolve a measurable's scoring boundaries, applying `ratios` to unset thresholds.
#[must_use]
pub fn resolve_thresholds(measurable: &Measurable, ratios: ThresholdRatios) -> Thresholds {
    measurable.thresholds(ratios)
}

/// Map `value` onto `[0, 120]`.
///
/// `min` and `max` are read as the lower and upper bound whichever order they
/// arrive in; `is_inverse` only decides which end is good. A target that is
/// missing, zero, or negative scores `0`. Non-finite values are read as `0`.
/// A zero-width band (`min == target` or `max == target`) steps straight to
/// the band's upper score.
#[must_use]
pub fn score(value: f64, min: f64, target: f64, max: f64, is_inverse: bool) -> f64 {
    if target.is_nan() || target <= 0.0 {
        return 0.0;
    }
    let value = to_finite_number(Some(value), 0.0);
    let (low, high) = (min.min(max), min.max(max));

    let raw = if is_inverse {
        let (worst, best) = (high, low);
        if value > worst {
            0.0
        } else if value <= best {
            MAX_SCORE
        } else if value > target {
            band(MIN_ZONE_SCORE, worst - value, worst - target)
        } else {
            band(TARGET_SCORE, target - value, target - best)
        }
    } else if value < low {
        0.0
    } else if value >= high {
        MAX_SCORE
    } else if value < target {
        band(MIN_ZONE_SCORE, value - low, target - low)
    } else {
        band(TARGET_SCORE, value - target, high - target)
    };

    raw.clamp(0.0, MAX_SCORE)
}

/// [`score`] with resolved [`Thresholds`].
#[must_use]
pub fn score_with(value: f64, thresholds: Thresholds, is_inverse: bool) -> f64 {
    score(
        value,
        thresholds.min,
        thresholds.target,
        thresholds.max,
        is_inverse,
    )
}

fn band(floor: f64, offset: f64, width: f64) -> f64 {
    if width > 0.0 {
        floor + offset / width * BAND_WIDTH
    } else {
        floor + BAND_WIDTH
    }
}

/// Score band, used by display layers to color results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Below 80.
    Below,
    /// `[80, 100)`.
    Approaching,
    /// `[100, 120)`.
    OnTarget,
    /// 120.
    Exceeded,
}

impl Zone {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= MAX_SCORE {
            Self::Exceeded
        } else if score >= TARGET_SCORE {
            Self::OnTarget
        } else if score >= MIN_ZONE_SCORE {
            Self::Approaching
        } else {
            Self::Below
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Approaching => "approaching",
            Self::OnTarget => "on_target",
            Self::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
