//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Collection name must not be empty: {0}")]
    EmptyCollection(&'static str),

    #[error("Crop band must lie within the surface (top {top}, height {height})")]
    InvalidCropBand { top: f64, height: f64 },

    #[error("Stroke width must be positive")]
    InvalidStrokeWidth,

    #[error("Maximum photo width must be positive")]
    InvalidMaxWidth,

    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
