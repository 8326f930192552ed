//! Signature capture configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::signature::{CaptureSettings, InputFilter};

use super::error::ValidationError;

/// Signature capture configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Accept ink from pens only
    #[serde(default)]
    pub pen_only: bool,

    /// Stay open after each save (attendee rosters)
    #[serde(default)]
    pub keep_open: bool,

    /// Stroke width in layout pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_success_flash_ms")]
    pub success_flash_ms: u64,

    #[serde(default = "default_crop_top_ratio")]
    pub crop_top_ratio: f64,

    #[serde(default = "default_crop_height_ratio")]
    pub crop_height_ratio: f64,
}

impl CaptureConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn success_flash(&self) -> Duration {
        Duration::from_millis(self.success_flash_ms)
    }

    /// Engine settings for this configuration
    pub fn to_settings(&self) -> CaptureSettings {
        CaptureSettings {
            input_filter: InputFilter::from_pen_only(self.pen_only),
            keep_open: self.keep_open,
            stroke_width: self.stroke_width,
            settle_delay: self.settle_delay(),
            success_flash: self.success_flash(),
            crop_top_ratio: self.crop_top_ratio,
            crop_height_ratio: self.crop_height_ratio,
        }
    }

    /// Validate capture configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ValidationError::InvalidStrokeWidth);
        }
        let top = self.crop_top_ratio;
        let height = self.crop_height_ratio;
        let in_range = top.is_finite()
            && height.is_finite()
            && top >= 0.0
            && height > 0.0
            && top + height <= 1.0;
        if !in_range {
            return Err(ValidationError::InvalidCropBand { top, height });
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            pen_only: false,
            keep_open: false,
            stroke_width: default_stroke_width(),
            settle_delay_ms: default_settle_delay_ms(),
            success_flash_ms: default_success_flash_ms(),
            crop_top_ratio: default_crop_top_ratio(),
            crop_height_ratio: default_crop_height_ratio(),
        }
    }
}

fn default_stroke_width() -> f64 {
    2.5
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_success_flash_ms() -> u64 {
    1500
}

fn default_crop_top_ratio() -> f64 {
    0.25
}

fn default_crop_height_ratio() -> f64 {
    0.5
}
