//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FOUNDER_COMPASS` prefix and nested values use double underscores as separators.
//! An optional `founder-compass.{toml,yaml,json}` file in the working directory
//! is read first; environment variables override it.
//!
//! # Example
//!
//! ```no_run
//! use founder_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.api.normalized_base_url());
//! ```

mod api;
mod error;
mod flow;
mod logging;
mod report;
mod storage;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use flow::FlowConfig;
pub use logging::LoggingConfig;
pub use report::ReportConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::Path;

/// Default config file stem, looked up in the working directory.
pub const CONFIG_FILE_STEM: &str = "founder-compass";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagnostic backend (base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Token store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Affirmation timing and catalog source
    #[serde(default)]
    pub flow: FlowConfig,

    /// Report layout
    #[serde(default)]
    pub report: ReportConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the optional config file and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `founder-compass.{toml,yaml,json}` if present
    /// 3. Reads environment variables with `FOUNDER_COMPASS` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FOUNDER_COMPASS__API__BASE_URL=...` -> `api.base_url = ...`
    /// - `FOUNDER_COMPASS__FLOW__AFFIRMATION_DELAY_MS=800` -> `flow.affirmation_delay_ms = 800`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE_STEM).required(false))
    }

    /// Like [`AppConfig::load`], but reads the given file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("FOUNDER_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.storage.validate()?;
        self.flow.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
