use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::Quarter;

const fn enabled() -> bool {
    true
}

/// Which quarters of the year a measurable is tracked in. Missing keys are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActiveQuarters {
    #[serde(default = "enabled", deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub q1: bool,
    #[serde(default = "enabled", deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub q2: bool,
    #[serde(default = "enabled", deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub q3: bool,
    #[serde(default = "enabled", deserialize_with = "flag")]
    #[schemars(with = "bool")]
    pub q4: bool,
}

impl Default for ActiveQuarters {
    fn default() -> Self {
        Self::all()
    }
}

impl ActiveQuarters {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            q1: true,
            q2: true,
            q3: true,
            q4: true,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, quarter: Quarter) -> bool {
        match quarter {
            Quarter::Q1 => self.q1,
            Quarter::Q2 => self.q2,
            Quarter::Q3 => self.q3,
            Quarter::Q4 => self.q4,
        }
    }
}

/// Accept `true`/`false` as well as `1`/`0`, which older records still carry.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Number(value) => value != 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_flags_decode() {
        let quarters: ActiveQuarters =
            serde_json::from_str(r#"{"q1":1,"q2":0,"q3":true,"q4":false}"#).unwrap();
        assert!(quarters.q1);
        assert!(!quarters.q2);
        assert!(quarters.q3);
        assert!(!quarters.q4);
    }

    #[test]
    fn missing_quarters_are_enabled() {
        let quarters: ActiveQuarters = serde_json::from_str(r#"{"q2":false}"#).unwrap();
        assert!(quarters.is_enabled(Quarter::Q1));
        assert!(!quarters.is_enabled(Quarter::Q2));
        assert!(quarters.is_enabled(Quarter::Q4));
    }
}
