//! # kpi-config
//!
//! Layered configuration loading for the scoring engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KPI_*` prefix, `__` as separator)
//! 2. Project-level `.kpi/config.toml`
//! 3. User-level `~/.config/kpi/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KPI_THRESHOLDS__MIN_RATIO` -> `thresholds.min_ratio` and
//! `KPI_CHECKINS__DUPLICATES` -> `checkins.duplicates`.
//!
//! # Usage
//!
//! ```no_run
//! use kpi_config::KpiConfig;
//!
//! let config = KpiConfig::load_with_dotenv().expect("config");
//! let settings = config.engine_settings().expect("valid settings");
//! println!("duplicates: {}", settings.duplicates);
//! ```

mod checkins;
mod error;
mod thresholds;

pub use checkins::CheckinConfig;
pub use error::ConfigError;
pub use thresholds::ThresholdConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use kpi_core::EngineSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct KpiConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub checkins: CheckinConfig,
}

impl KpiConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".kpi/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("KPI_").split("__"))
    }

    /// Validate and convert into the settings the engine runs with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the threshold ratios are out
    /// of range.
    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        Ok(EngineSettings {
            thresholds: self.thresholds.validate()?,
            duplicates: self.checkins.duplicates,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kpi").join("config.toml"))
    }

    /// Load `.env` from the current directory, if present. Variables already
    /// set in the process are not overwritten.
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }
    }
}
