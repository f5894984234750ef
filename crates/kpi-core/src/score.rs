//! The `Score` type: a measured value or the explicit "not measured" state.

use serde::{Deserialize, Serialize};

/// Result of scoring or aggregating an entity.
///
/// `Unmeasured` is distinct from `Measured(0.0)`: a real zero check-in scores
/// zero, while an entity with no data for the period is left out of every
/// weighted average above it. On the wire this is `number | null`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Score {
    Measured(f64),
    #[default]
    Unmeasured,
}

impl Score {
    /// Wrap a computed value. Non-finite values are not a score.
    #[must_use]
    pub fn measured(value: f64) -> Self {
        if value.is_finite() {
            Self::Measured(value)
        } else {
            Self::Unmeasured
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Measured(value) => Some(value),
            Self::Unmeasured => None,
        }
    }

    #[must_use]
    pub const fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unmeasured, Self::measured)
    }
}

impl From<Score> for Option<f64> {
    fn from(score: Score) -> Self {
        score.value()
    }
}
