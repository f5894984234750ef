//! Lenient numeric decoding for API records.
//!
//! Numeric columns often reach the API as strings (`"12.5"`). A value that is
//! neither a number nor a numeric string decodes as missing instead of
//! failing the whole record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::measurable::MonthlyTargets;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    fn into_number(self) -> Option<f64> {
        let value: Option<f64> = match self {
            Self::Number(value) => Some(value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Number, numeric string, or anything else as `None`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Loose::deserialize(deserializer)?.into_number())
}

/// A present but unreadable weight disables the measurable.
pub fn weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.unwrap_or(0.0))
}

/// Monthly overrides with unreadable entries dropped.
pub fn targets<'de, D>(deserializer: D) -> Result<MonthlyTargets, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = std::collections::BTreeMap::<u8, Loose>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(month, value)| value.into_number().map(|v| (month, v)))
        .collect())
}
