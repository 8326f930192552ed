//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SAFETY_FORMS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use safety_forms::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Drafts live in {}", config.storage.drafts_collection);
//! ```

mod capture;
mod compression;
mod error;
mod security;
mod storage;
mod telemetry;

pub use capture::CaptureConfig;
pub use compression::CompressionConfig;
pub use error::{ConfigError, ValidationError};
pub use security::SecurityConfig;
pub use storage::StorageConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the security section is required; every other section has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote collections and local cache
    #[serde(default)]
    pub storage: StorageConfig,

    /// Signature capture behaviour
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Photo compression
    #[serde(default)]
    pub compression: CompressionConfig,

    /// Cascade confirmation secret
    pub security: SecurityConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SAFETY_FORMS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SAFETY_FORMS__CAPTURE__PEN_ONLY=true` -> `capture.pen_only = true`
    /// - `SAFETY_FORMS__SECURITY__CASCADE_PASSWORD=...` -> `security.cascade_password = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SAFETY_FORMS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
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
        self.storage.validate()?;
        self.capture.validate()?;
        self.compression.validate()?;
        self.security.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
