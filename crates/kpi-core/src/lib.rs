//! # kpi-core
//!
//! Core types shared by the KPI scoring engine.
//!
//! This crate provides the foundational types used across the workspace:
//! - `Measurable` and `Measurement` records as assembled by the persistence layer
//! - Wire enums (cycle, frequency, accumulation method, metric type) with lenient decoding
//! - The `Score` type that keeps "not measured" apart from a real zero
//! - Numeric normalization helpers and threshold ratios
//! - Input-boundary validation for check-in lists
//! - Engine settings shared with `kpi-config`
//! - Cross-cutting error types

pub mod boundary;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod numeric;
pub mod score;
pub mod settings;
pub mod thresholds;

pub use boundary::{DuplicatePolicy, normalize_measurements};
pub use entities::{ActiveQuarters, Measurable, Measurement, MonthlyTargets};
pub use enums::{AccumulationMethod, Cycle, Frequency, MetricType, Quarter};
pub use errors::CoreError;
pub use score::Score;
pub use settings::EngineSettings;
pub use thresholds::{ThresholdRatios, Thresholds};
