//! Consolidation: fold check-ins (or monthly targets) into one period-to-date value.

use kpi_core::numeric::to_finite_number;
use kpi_core::{AccumulationMethod, Measurement, MonthlyTargets};
use serde::{Deserialize, Serialize};

use crate::months::MonthSet;
use crate::period::PeriodWindow;

/// A period-to-date realized value.
///
/// `has_data` decides "not measured" downstream, never `value`: a real zero
/// check-in is data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Accumulated {
    pub value: f64,
    pub has_data: bool,
}

impl Accumulated {
    pub const EMPTY: Self = Self {
        value: 0.0,
        has_data: false,
    };

    #[must_use]
    pub const fn measured(value: f64) -> Self {
        Self {
            value,
            has_data: true,
        }
    }

    /// The value when there is data, `None` otherwise.
    #[must_use]
    pub const fn value_if_measured(self) -> Option<f64> {
        if self.has_data { Some(self.value) } else { None }
    }
}

/// Consolidate the check-ins that fall inside `window`.
///
/// Check-ins are ordered by month before folding; entries for the same month
/// keep their list order, so under `last_value` a duplicate resolves to the
/// later entry. `manual` folds like `last_value` and returns
/// [`Accumulated::EMPTY`] without check-ins so the caller can substitute a
/// hand-entered value.
#[must_use]
pub fn accumulate(
    measurements: &[Measurement],
    method: AccumulationMethod,
    window: &PeriodWindow,
) -> Accumulated {
    let mut in_window: Vec<&Measurement> =
        measurements.iter().filter(|m| window.contains(m)).collect();
    if in_window.is_empty() {
        return Accumulated::EMPTY;
    }
    in_window.sort_by_key(|m| m.month);

    let values = in_window.iter().map(|m| m.value_or_zero());
    let value = match method {
        AccumulationMethod::Sum => values.sum::<f64>(),
        AccumulationMethod::Average => {
            #[allow(clippy::cast_precision_loss)]
            let count = in_window.len() as f64;
            values.sum::<f64>() / count
        }
        AccumulationMethod::LastValue | AccumulationMethod::Manual => {
            values.last().unwrap_or_default()
        }
    };

    Accumulated::measured(value)
}

/// Planned value through the months in `months`.
///
/// `sum` adds each month's target. Every other method takes the target of the
/// latest month (the current expectation, not an average of targets). Months
/// without an override use `default_target`.
#[must_use]
pub fn accumulate_planned(
    monthly_targets: &MonthlyTargets,
    default_target: f64,
    method: AccumulationMethod,
    months: MonthSet,
) -> f64 {
    let default_target = to_finite_number(Some(default_target), 0.0);
    let target_for = |month: u8| {
        to_finite_number(monthly_targets.get(&month).copied(), default_target)
    };

    match method {
        AccumulationMethod::Sum => months.iter().map(target_for).sum(),
        AccumulationMethod::Average
        | AccumulationMethod::LastValue
        | AccumulationMethod::Manual => months.last().map_or(0.0, target_for),
    }
}
