//! Per-measurable evaluation: consolidate, plan, score.
//!
//! Ties the period resolver, consolidation, and zone mapper together for one
//! indicator or key result, and produces the leaf of an aggregation tree.

use kpi_core::{
    AccumulationMethod, CoreError, EngineSettings, Measurable, Measurement, Score, Thresholds,
    normalize_measurements,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateNode, ScoreCard};
use crate::consolidation::{Accumulated, accumulate, accumulate_planned};
use crate::period::{AsOf, EvaluationWindow, has_active_months_in_cycle};
use crate::zones::{Zone, score_with};

/// Everything derived for one measurable at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `false` when the measurable has nothing to measure in its cycle.
    pub applicable: bool,
    pub realized: Accumulated,
    pub planned_to_date: f64,
    pub final_target: f64,
    /// Zone score of realized against planned-to-date. Unmeasured until a
    /// scheduled month has passed.
    pub pace: Score,
    /// Realized as a percentage of the final target, uncapped above 100.
    pub progress: Score,
    pub zone: Option<Zone>,
}

impl Evaluation {
    const NOT_APPLICABLE: Self = Self {
        applicable: false,
        realized: Accumulated::EMPTY,
        planned_to_date: 0.0,
        final_target: 0.0,
        pace: Score::Unmeasured,
        progress: Score::Unmeasured,
        zone: None,
    };

    #[must_use]
    pub const fn card(&self) -> ScoreCard {
        ScoreCard {
            pace: self.pace,
            progress: self.progress,
        }
    }

    /// Leaf node weighted by the measurable's own weight.
    #[must_use]
    pub fn into_leaf(self, label: impl Into<String>, measurable: &Measurable) -> AggregateNode {
        AggregateNode::leaf(label, measurable.weight_value(), self.card())
    }
}

/// Stateless evaluator carrying validated settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    settings: EngineSettings,
}

impl Evaluator {
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Evaluate `measurable` over the check-ins as given.
    ///
    /// Never fails: missing targets, empty windows, and malformed values all
    /// resolve to `0` or [`Score::Unmeasured`].
    #[must_use]
    pub fn evaluate(
        &self,
        measurable: &Measurable,
        measurements: &[Measurement],
        as_of: AsOf,
    ) -> Evaluation {
        if !has_active_months_in_cycle(measurable, measurable.cycle) {
            tracing::debug!(cycle = %measurable.cycle, "measurable has no active months in cycle");
            return Evaluation::NOT_APPLICABLE;
        }

        let method = measurable.accumulation_method;
        let window = EvaluationWindow::new(measurable, as_of);

        let mut realized = accumulate(measurements, method, &window.realized);
        if method == AccumulationMethod::Manual && !realized.has_data {
            if let Some(value) = measurable.manual_value.filter(|v| v.is_finite()) {
                realized = Accumulated::measured(value);
            }
        }

        let default_target = planned_default(measurable, window.scheduled.len());
        let planned_to_date = accumulate_planned(
            &measurable.monthly_targets,
            default_target,
            method,
            window.planned,
        );
        let final_target = accumulate_planned(
            &measurable.monthly_targets,
            default_target,
            method,
            window.full,
        );

        let thresholds = measurable.thresholds(self.settings.thresholds);
        // Nothing scheduled yet: no expectation to be on pace with.
        let pace = if window.planned.is_empty() {
            Score::Unmeasured
        } else {
            realized.value_if_measured().map_or(Score::Unmeasured, |value| {
                let pace_thresholds = self.pace_thresholds(thresholds, planned_to_date);
                Score::measured(score_with(value, pace_thresholds, measurable.is_inverse))
            })
        };
        let progress = realized.value_if_measured().map_or(Score::Unmeasured, |value| {
            Score::measured(progress_percent(value, final_target, measurable.is_inverse))
        });

        tracing::debug!(
            method = %method,
            cycle = %measurable.cycle,
            has_data = realized.has_data,
            realized = realized.value,
            planned_to_date,
            final_target,
            "evaluated measurable"
        );

        Evaluation {
            applicable: true,
            realized,
            planned_to_date,
            final_target,
            pace,
            progress,
            zone: pace.value().map(Zone::from_score),
        }
    }

    /// Like [`evaluate`](Self::evaluate), but first runs the check-ins through
    /// the configured duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] when the duplicate policy is `reject` and the
    /// check-ins contain a repeated (month, year) pair or an invalid month.
    pub fn evaluate_checked(
        &self,
        measurable: &Measurable,
        measurements: &[Measurement],
        as_of: AsOf,
    ) -> Result<Evaluation, CoreError> {
        let measurements = normalize_measurements(measurements, self.settings.duplicates)?;
        Ok(self.evaluate(measurable, &measurements, as_of))
    }

    /// Evaluate many independent measurables in parallel. Results keep input order.
    #[must_use]
    pub fn evaluate_many(
        &self,
        items: &[(Measurable, Vec<Measurement>)],
        as_of: AsOf,
    ) -> Vec<Result<Evaluation, CoreError>> {
        items
            .par_iter()
            .map(|(measurable, measurements)| {
                self.evaluate_checked(measurable, measurements, as_of)
            })
            .collect()
    }

    /// Thresholds for the pace score: the measurable's band moved onto the
    /// planned-to-date value.
    fn pace_thresholds(&self, thresholds: Thresholds, planned: f64) -> Thresholds {
        if thresholds.target > 0.0 {
            thresholds.scaled_to(planned)
        } else {
            let ratios = self.settings.thresholds;
            Thresholds {
                min: planned * ratios.min_ratio,
                target: planned,
                max: planned * ratios.max_ratio,
            }
        }
    }
}

/// Planned value for months without an override: an even share of the target
/// for `sum`, the target itself otherwise.
fn planned_default(measurable: &Measurable, scheduled_months: usize) -> f64 {
    let target = measurable.target_value();
    match measurable.accumulation_method {
        AccumulationMethod::Sum if scheduled_months > 0 => {
            #[allow(clippy::cast_precision_loss)]
            let months = scheduled_months as f64;
            target / months
        }
        AccumulationMethod::Sum => 0.0,
        AccumulationMethod::Average
        | AccumulationMethod::LastValue
        | AccumulationMethod::Manual => target,
    }
}

/// Realized as a percentage of `final_target`, floored at `0`.
///
/// Inverse measurables mirror around the target: hitting it is 100, every
/// unit below it adds the same amount an extra unit would in normal mode.
fn progress_percent(realized: f64, final_target: f64, is_inverse: bool) -> f64 {
    if final_target.is_nan() || final_target <= 0.0 {
        return 0.0;
    }
    let ratio = realized / final_target;
    let percent = (if is_inverse { 2.0 - ratio } else { ratio }) * 100.0;
    percent.max(0.0)
}
