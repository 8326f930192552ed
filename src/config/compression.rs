//! Photo compression configuration

use serde::Deserialize;

use crate::adapters::JpegCompressor;
use crate::domain::foundation::Percentage;

use super::error::ValidationError;

/// Photo compression configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompressionConfig {
    /// Width cap in pixels
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// JPEG quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl CompressionConfig {
    pub fn compressor(&self) -> JpegCompressor {
        JpegCompressor::new(self.max_width, Percentage::new(self.quality))
    }

    /// Validate compression configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_width == 0 {
            return Err(ValidationError::InvalidMaxWidth);
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ValidationError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            quality: default_quality(),
        }
    }
}

fn default_max_width() -> u32 {
    800
}

fn default_quality() -> u8 {
    70
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_defaults() {
        let compressor = CompressionConfig::default().compressor();
        assert_eq!(compressor.max_width(), 800);
        assert_eq!(compressor.quality().value(), 70);
    }

    #[test]
    fn test_validation_quality_range() {
        for quality in [0, 101] {
            let config = CompressionConfig {
                quality,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidQuality(quality)));
        }
    }

    #[test]
    fn test_validation_max_width() {
        let config = CompressionConfig {
            max_width: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxWidth));
    }
}
