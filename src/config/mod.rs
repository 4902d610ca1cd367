//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `REPORT_CARD` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use report_card::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Exporting to {}", config.export.output_dir.display());
//! ```

mod error;
mod export;
mod handoff;
mod institution;
mod logging;
mod submission;

pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use handoff::{HandoffBackend, HandoffConfig};
pub use institution::InstitutionConfig;
pub use logging::{Environment, LoggingConfig};
pub use submission::SubmissionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Letterhead and signature defaults
    #[serde(default)]
    pub institution: InstitutionConfig,

    /// Where the assembled card is handed to viewers
    #[serde(default)]
    pub handoff: HandoffConfig,

    /// Output directory, format and PDF converter
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REPORT_CARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REPORT_CARD__EXPORT__FORMAT=pdf` -> `export.format = pdf`
    /// - `REPORT_CARD__INSTITUTION__NAME=...` -> `institution.name = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REPORT_CARD")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.institution.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.logging.is_production()
    }
}
