//! Record types handed to the engine by the persistence layer.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` with
//! camelCase field names so API payloads decode without an adapter layer.

mod lenient;
mod measurable;
mod measurement;
mod quarters;

pub use measurable::{Measurable, MonthlyTargets};
pub use measurement::Measurement;
pub use quarters::ActiveQuarters;
