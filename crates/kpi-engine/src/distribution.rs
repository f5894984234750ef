//! Target distribution: split one annual target into per-month targets.
//!
//! This is the inverse of consolidation. Re-consolidating the map with the
//! same accumulation method reproduces the annual target; for `sum` the split
//! is exact (whole-unit remainders for integer metrics, cent residuals
//! otherwise).

use kpi_core::numeric::{round2, to_finite_number};
use kpi_core::{AccumulationMethod, ActiveQuarters, Frequency, Measurable, MetricType, MonthlyTargets};

use crate::period::scheduled_months;

/// Round a target per the metric's rule: floor for integers, cents otherwise.
#[must_use]
pub fn round_for_metric(value: f64, metric_type: MetricType) -> f64 {
    if metric_type.is_integer() {
        value.floor()
    } else {
        round2(value)
    }
}

/// Per-month targets over the active measurement months.
///
/// - `manual`: empty, targets are entered by hand.
/// - `average` / `last_value`: every month gets the annual target itself.
/// - `sum`: the target is split evenly. Integer metrics give the remainder as
///   `+1` to the last months; other metrics round to cents and put the
///   residual on the last month.
#[must_use]
pub fn distribute(
    annual_target: f64,
    method: AccumulationMethod,
    active_quarters: &ActiveQuarters,
    start_month: u8,
    metric_type: MetricType,
    frequency: Frequency,
) -> MonthlyTargets {
    let months = scheduled_months(active_quarters, start_month, frequency);
    let annual_target = to_finite_number(Some(annual_target), 0.0);
    if months.is_empty() {
        return MonthlyTargets::new();
    }

    match method {
        AccumulationMethod::Manual => MonthlyTargets::new(),
        AccumulationMethod::Average | AccumulationMethod::LastValue => {
            let value = round_for_metric(annual_target, metric_type);
            months.iter().map(|m| (m, value)).collect()
        }
        AccumulationMethod::Sum => {
            let count = months.len();
            #[allow(clippy::cast_precision_loss)]
            let n = count as f64;

            if metric_type.is_integer() {
                let total = annual_target.floor();
                let base = (total / n).floor();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let remainder = (total - base * n).round().max(0.0) as usize;
                let first_bumped = count - remainder.min(count);
                months
                    .iter()
                    .enumerate()
                    .map(|(idx, m)| {
                        let bump = if idx >= first_bumped { 1.0 } else { 0.0 };
                        (m, base + bump)
                    })
                    .collect()
            } else {
                let base = round2(annual_target / n);
                let last = round2(base.mul_add(-(n - 1.0), annual_target));
                months
                    .iter()
                    .enumerate()
                    .map(|(idx, m)| (m, if idx + 1 == count { last } else { base }))
                    .collect()
            }
        }
    }
}

/// [`distribute`] over a measurable's own target and schedule.
#[must_use]
pub fn distribute_for(measurable: &Measurable) -> MonthlyTargets {
    distribute(
        measurable.target_value(),
        measurable.accumulation_method,
        &measurable.active_quarters,
        measurable.start_month_value(),
        measurable.metric_type,
        measurable.frequency,
    )
}
