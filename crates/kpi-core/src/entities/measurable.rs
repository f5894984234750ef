use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::entities::ActiveQuarters;
use crate::enums::{AccumulationMethod, Cycle, Frequency, MetricType};
use crate::numeric::to_finite_number;
use crate::thresholds::{ThresholdRatios, Thresholds};

/// Sparse month (1-12) → target override. JSON keys are month numbers as strings.
pub type MonthlyTargets = BTreeMap<u8, f64>;

const fn default_weight() -> f64 {
    1.0
}

const fn default_start_month() -> u8 {
    1
}

/// An indicator or OKR key result: anything with a target, a check-in
/// history, and a weight in its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Measurable {
    /// The "100%" value. `None`, zero, or negative scores as `0`.
    #[serde(default, deserialize_with = "lenient::number")]
    #[schemars(with = "Option<f64>")]
    pub target: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    #[schemars(with = "Option<f64>")]
    pub threshold_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    #[schemars(with = "Option<f64>")]
    pub threshold_max: Option<f64>,
    /// Lower raw values are better.
    #[serde(default)]
    pub is_inverse: bool,
    /// Relative contribution to the parent. Percentage-style at objective and
    /// sector level, arbitrary positive units at person level.
    #[serde(default = "default_weight", deserialize_with = "lenient::weight")]
    #[schemars(with = "f64")]
    pub weight: f64,
    #[serde(default)]
    pub accumulation_method: AccumulationMethod,
    #[serde(default)]
    pub metric_type: MetricType,
    #[serde(default, deserialize_with = "lenient::targets")]
    #[schemars(with = "BTreeMap<String, f64>")]
    pub monthly_targets: MonthlyTargets,
    #[serde(default)]
    pub active_quarters: ActiveQuarters,
    /// Months before this one are inactive.
    #[serde(default = "default_start_month")]
    pub start_month: u8,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub cycle: Cycle,
    /// Hand-entered accumulated value used by `manual` measurables when the
    /// period has no check-ins.
    #[serde(default, deserialize_with = "lenient::number")]
    #[schemars(with = "Option<f64>")]
    pub manual_value: Option<f64>,
}

impl Default for Measurable {
    fn default() -> Self {
        Self {
            target: None,
            threshold_min: None,
            threshold_max: None,
            is_inverse: false,
            weight: default_weight(),
            accumulation_method: AccumulationMethod::default(),
            metric_type: MetricType::default(),
            monthly_targets: MonthlyTargets::new(),
            active_quarters: ActiveQuarters::all(),
            start_month: default_start_month(),
            frequency: Frequency::default(),
            cycle: Cycle::default(),
            manual_value: None,
        }
    }
}

impl Measurable {
    /// The target, with missing or non-finite values read as `0`.
    #[must_use]
    pub fn target_value(&self) -> f64 {
        to_finite_number(self.target, 0.0)
    }

    /// The weight, with non-finite or negative values read as `0` (disabled).
    #[must_use]
    pub fn weight_value(&self) -> f64 {
        to_finite_number(Some(self.weight), 0.0).max(0.0)
    }

    /// Start month clamped into `1..=12`.
    #[must_use]
    pub fn start_month_value(&self) -> u8 {
        self.start_month.clamp(1, 12)
    }

    /// Resolve `min` and `max`, applying `ratios` to the target for unset bounds.
    ///
    /// Bounds keep the `min <= target <= max` order for inverse measurables too;
    /// the scorer decides which end is good.
    #[must_use]
    pub fn thresholds(&self, ratios: ThresholdRatios) -> Thresholds {
        let target = self.target_value();
        Thresholds {
            min: to_finite_number(self.threshold_min, target * ratios.min_ratio),
            target,
            max: to_finite_number(self.threshold_max, target * ratios.max_ratio),
        }
    }
}
