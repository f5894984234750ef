//! Check-in input boundary configuration.

use kpi_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckinConfig {
    /// What to do with two check-ins for the same (month, year).
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}
