//! Engine tunables resolved from configuration.

use serde::{Deserialize, Serialize};

use crate::boundary::DuplicatePolicy;
use crate::thresholds::ThresholdRatios;

/// Validated knobs the evaluator runs with. Produced by `kpi-config` or built
/// directly by callers that carry their own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub thresholds: ThresholdRatios,
    pub duplicates: DuplicatePolicy,
}
