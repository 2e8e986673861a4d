use std::time::Duration;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_SPAN_DAYS, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMEZONE,
};
use crate::error::{CoreError, CoreResult};
use crate::util::calendar::parse_timezone;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits and defaults applied to every occurrence generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// IANA timezone used when the caller does not name one.
    pub default_timezone: String,
    /// Longest allowed distance, in days, between a schedule's start and end date.
    pub max_span_days: u32,
    /// Rows per insert statement when the caller does not choose a batch size.
    pub batch_size: usize,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// ## Summary
    /// Returns the wall-clock budget for one generation run.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// ## Summary
    /// Rejects generation settings no run could work with.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the default timezone is unknown, or if
    /// the span limit, batch size or timeout is zero.
    pub fn validate(&self) -> CoreResult<()> {
        parse_timezone(&self.default_timezone).map_err(|e| {
            CoreError::ConfigError(format!("generation.default_timezone: {e}"))
        })?;
        if self.max_span_days == 0 {
            return Err(CoreError::ConfigError(
                "generation.max_span_days must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(CoreError::ConfigError(
                "generation.batch_size must be positive".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "generation.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `config.toml`, and environment variables into a `Settings`.
    /// Environment variables take precedence over file values. Nested keys use a double
    /// underscore, e.g. `GENERATION__MAX_SPAN_DAYS`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails,
    /// or if the generation settings are unusable.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("generation.default_timezone", DEFAULT_TIMEZONE)?
            .set_default("generation.max_span_days", i64::from(DEFAULT_MAX_SPAN_DAYS))?
            .set_default("generation.batch_size", i64::try_from(DEFAULT_BATCH_SIZE)?)?
            .set_default("generation.timeout_secs", i64::try_from(DEFAULT_TIMEOUT_SECS)?)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.generation.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
