//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PICKUP_HUB` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pickup_hub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Page limit: {}", config.intake.max_page_limit);
//! ```

mod database;
mod error;
mod intake;
mod telemetry;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use intake::{IntakeConfig, PAGE_LIMIT_CEILING};
pub use telemetry::{LogFormat, TelemetryConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "PICKUP_HUB";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an in-memory
/// deployment with pretty `info` logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log filter and output format
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Intake rules (allowed locations, page limit)
    #[serde(default)]
    pub intake: IntakeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PICKUP_HUB` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits `intake.allowed_locations` on commas
    ///
    /// # Environment Variable Format
    ///
    /// - `PICKUP_HUB__DATABASE__URL=...` -> `database.url = ...`
    /// - `PICKUP_HUB__INTAKE__MAX_PAGE_LIMIT=50` -> `intake.max_page_limit = 50`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("intake.allowed_locations"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.telemetry.validate()?;
        self.intake.validate()?;
        Ok(())
    }
}
