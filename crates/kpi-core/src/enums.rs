//! Wire enums for measurables: cycle, frequency, accumulation method, metric type.
//!
//! Every enum serializes as its wire code (`q1`, `anual`, `mensal`, `last_value`, ...).
//! Decoding is lenient: an unrecognized code falls back to the most permissive
//! variant instead of failing, so a malformed record still produces a score.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// Implements `JsonSchema` as a string enum over the canonical wire codes.
macro_rules! code_schema {
    ($ty:ident) => {
        impl JsonSchema for $ty {
            fn schema_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                let codes = $ty::CODES;
                json_schema!({
                    "type": "string",
                    "enum": codes
                })
            }
        }

        impl From<String> for $ty {
            fn from(code: String) -> Self {
                Self::from_code(&code)
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

fn fallback<T: fmt::Display>(kind: &'static str, code: &str, value: T) -> T {
    tracing::warn!(kind, code, fallback = %value, "unknown code; using fallback");
    value
}

// ---------------------------------------------------------------------------
// Quarter
// ---------------------------------------------------------------------------

/// Calendar quarter owning a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter owning `month` (`1-3 → Q1` ... `10-12 → Q4`).
    ///
    /// Returns `None` for months outside `1..=12`.
    #[must_use]
    pub const fn of_month(month: u8) -> Option<Self> {
        match month {
            1..=3 => Some(Self::Q1),
            4..=6 => Some(Self::Q2),
            7..=9 => Some(Self::Q3),
            10..=12 => Some(Self::Q4),
            _ => None,
        }
    }

    /// First and last month of the quarter.
    #[must_use]
    pub const fn months(self) -> (u8, u8) {
        match self {
            Self::Q1 => (1, 3),
            Self::Q2 => (4, 6),
            Self::Q3 => (7, 9),
            Self::Q4 => (10, 12),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// Period window considered when scoring: one quarter or the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Cycle {
    Q1,
    Q2,
    Q3,
    Q4,
    #[default]
    Annual,
}

impl Cycle {
    pub const CODES: &'static [&'static str] = &["q1", "q2", "q3", "q4", "anual"];

    /// Decode a wire code. Unknown codes fall back to [`Cycle::Annual`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match normalize(code).as_str() {
            "q1" => Self::Q1,
            "q2" => Self::Q2,
            "q3" => Self::Q3,
            "q4" => Self::Q4,
            "anual" | "annual" => Self::Annual,
            _ => fallback("cycle", code, Self::Annual),
        }
    }

    /// The quarter this cycle covers, or `None` for the annual cycle.
    #[must_use]
    pub const fn quarter(self) -> Option<Quarter> {
        match self {
            Self::Q1 => Some(Quarter::Q1),
            Self::Q2 => Some(Quarter::Q2),
            Self::Q3 => Some(Quarter::Q3),
            Self::Q4 => Some(Quarter::Q4),
            Self::Annual => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Annual => "anual",
        }
    }
}

code_schema!(Cycle);

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How often a measurable is expected to receive a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Frequency {
    #[default]
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Frequency {
    pub const CODES: &'static [&'static str] = &["mensal", "trimestral", "semestral", "anual"];

    /// Decode a wire code. Unknown codes fall back to [`Frequency::Monthly`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match normalize(code).as_str() {
            "mensal" | "monthly" => Self::Monthly,
            "trimestral" | "quarterly" => Self::Quarterly,
            "semestral" | "semiannual" => Self::Semiannual,
            "anual" | "annual" => Self::Annual,
            _ => fallback("frequency", code, Self::Monthly),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "mensal",
            Self::Quarterly => "trimestral",
            Self::Semiannual => "semestral",
            Self::Annual => "anual",
        }
    }
}

code_schema!(Frequency);

// ---------------------------------------------------------------------------
// AccumulationMethod
// ---------------------------------------------------------------------------

/// Rule for folding period check-ins into one period-to-date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum AccumulationMethod {
    Sum,
    Average,
    #[default]
    LastValue,
    /// Like `LastValue`, but the caller may substitute a hand-entered total
    /// when no check-in exists.
    Manual,
}

impl AccumulationMethod {
    pub const CODES: &'static [&'static str] = &["sum", "average", "last_value", "manual"];

    /// Decode a wire code. Unknown codes fall back to [`AccumulationMethod::LastValue`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match normalize(code).as_str() {
            "sum" => Self::Sum,
            "average" => Self::Average,
            "last_value" => Self::LastValue,
            "manual" => Self::Manual,
            _ => fallback("accumulation_method", code, Self::LastValue),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::LastValue => "last_value",
            Self::Manual => "manual",
        }
    }
}

code_schema!(AccumulationMethod);

// ---------------------------------------------------------------------------
// MetricType
// ---------------------------------------------------------------------------

/// Unit of a measurable's values. Only `Integer` changes engine behavior
/// (floor rounding and whole-unit remainders when distributing targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum MetricType {
    #[default]
    Number,
    Integer,
    Percentage,
    Currency,
}

impl MetricType {
    pub const CODES: &'static [&'static str] = &["number", "integer", "percentage", "currency"];

    /// Decode a wire code. Unknown codes fall back to [`MetricType::Number`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match normalize(code).as_str() {
            "number" => Self::Number,
            "integer" => Self::Integer,
            "percentage" => Self::Percentage,
            "currency" => Self::Currency,
            _ => fallback("metric_type", code, Self::Number),
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Percentage => "percentage",
            Self::Currency => "currency",
        }
    }
}

code_schema!(MetricType);
