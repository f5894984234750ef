//! # kpi-engine
//!
//! Scoring and aggregation for indicators and OKR key results.
//!
//! Every function here is pure and synchronous: it reads in-memory records
//! and returns derived numbers. Calls on different measurables are independent
//! and safe to run concurrently.
//!
//! Data flows leaf-first:
//! - [`period`] resolves cycle ranges and active months
//! - [`consolidation`] folds check-ins into a period-to-date value
//! - [`distribution`] splits an annual target into monthly targets
//! - [`zones`] maps a value onto the 0-120 score bands
//! - [`aggregate`] combines child scores by weight, skipping unmeasured children
//! - [`evaluator`] runs the pipeline for one measurable

pub mod aggregate;
pub mod consolidation;
pub mod distribution;
pub mod evaluator;
pub mod months;
pub mod period;
pub mod zones;

pub use aggregate::{AggregateNode, NodeKind, ScoreCard, WeightedScore, weighted_score};
pub use consolidation::{Accumulated, accumulate, accumulate_planned};
pub use distribution::{distribute, distribute_for, round_for_metric};
pub use evaluator::{Evaluation, Evaluator};
pub use months::MonthSet;
pub use period::{
    AsOf, EvaluationWindow, MonthRange, PeriodWindow, active_months, has_active_months_in_cycle,
    is_month_active, measurement_months, month_range_for_cycle, scheduled_months,
};
pub use zones::{MAX_SCORE, Zone, resolve_thresholds, score, score_with};
