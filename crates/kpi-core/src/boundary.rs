//! Input-boundary cleanup for check-in lists.
//!
//! The engine itself consumes whatever list it is given (a duplicate
//! (month, year) pair resolves by list order). Callers that want a
//! deterministic input run it through [`normalize_measurements`] first.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Measurement;
use crate::errors::CoreError;

/// What to do when two check-ins share a (month, year) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the entry that appears later in the list.
    #[default]
    LastWins,
    /// Fail with [`CoreError::DuplicateMeasurement`].
    Reject,
}

impl DuplicatePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWins => "last_wins",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve duplicate check-ins and out-of-range months per `policy`.
///
/// Under [`DuplicatePolicy::LastWins`] a month outside `1..=12` is dropped;
/// under [`DuplicatePolicy::Reject`] it is an error.
///
/// The surviving entries keep the position of the first occurrence of their
/// (month, year) pair.
///
/// # Errors
///
/// Under [`DuplicatePolicy::Reject`], returns [`CoreError::DuplicateMeasurement`]
/// when a (month, year) pair repeats and [`CoreError::InvalidMonth`] for a
/// month outside `1..=12`.
pub fn normalize_measurements(
    measurements: &[Measurement],
    policy: DuplicatePolicy,
) -> Result<Vec<Measurement>, CoreError> {
    let mut out: Vec<Measurement> = Vec::with_capacity(measurements.len());
    let mut seen: HashMap<(i32, u8), usize> = HashMap::new();

    for m in measurements {
        if !(1..=12).contains(&m.month) {
            if policy == DuplicatePolicy::Reject {
                return Err(CoreError::InvalidMonth(m.month));
            }
            tracing::warn!(month = m.month, year = m.year, "dropping check-in with invalid month");
            continue;
        }

        match seen.get(&(m.year, m.month)) {
            Some(&idx) => match policy {
                DuplicatePolicy::LastWins => {
                    tracing::warn!(month = m.month, year = m.year, "duplicate check-in; keeping the later entry");
                    out[idx] = *m;
                }
                DuplicatePolicy::Reject => {
                    return Err(CoreError::DuplicateMeasurement {
                        month: m.month,
                        year: m.year,
                    });
                }
            },
            None => {
                seen.insert((m.year, m.month), out.len());
                out.push(*m);
            }
        }
    }

    Ok(out)
}
