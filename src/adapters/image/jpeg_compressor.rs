//! JPEG Image Compressor Adapter
//!
//! Downscales photos to a maximum width and re-encodes them as baseline
//! JPEG. Images already narrower than the cap keep their dimensions.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::domain::foundation::Percentage;
use crate::ports::{CompressionError, EncodedImage, ImageCompressor};

pub const JPEG_MIME: &str = "image/jpeg";

/// Lossy photo compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegCompressor {
    max_width: u32,
    quality: Percentage,
}

impl JpegCompressor {
    pub const DEFAULT_MAX_WIDTH: u32 = 800;
    pub const DEFAULT_QUALITY: Percentage = Percentage::new(70);

    pub fn new(max_width: u32, quality: Percentage) -> Self {
        Self {
            max_width: max_width.max(1),
            quality,
        }
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn quality(&self) -> Percentage {
        self.quality
    }

    /// Target dimensions for a `width` x `height` source.
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        if width <= self.max_width {
            return (width, height);
        }
        let scaled = f64::from(height) * f64::from(self.max_width) / f64::from(width);
        (self.max_width, (scaled.round() as u32).max(1))
    }

    fn downscale(&self, image: DynamicImage) -> DynamicImage {
        let (width, height) = self.target_size(image.width(), image.height());
        if (width, height) == (image.width(), image.height()) {
            return image;
        }
        image.resize_exact(width, height, FilterType::Triangle)
    }
}

impl Default for JpegCompressor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_WIDTH, Self::DEFAULT_QUALITY)
    }
}

impl ImageCompressor for JpegCompressor {
    fn compress(&self, input: &[u8]) -> Result<EncodedImage, CompressionError> {
        let decoded =
            image::load_from_memory(input).map_err(|e| CompressionError::Decode(e.to_string()))?;
        let rgb = self.downscale(decoded).to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut bytes = Vec::new();
        // JPEG quality is 1..=100.
        let quality = self.quality.value().max(1);
        JpegEncoder::new_with_quality(&mut bytes, quality)
            .encode_image(&rgb)
            .map_err(|e| CompressionError::Encode(e.to_string()))?;

        tracing::debug!(width, height, size = bytes.len(), "Compressed photo");
        Ok(EncodedImage {
            mime: JPEG_MIME,
            width,
            height,
            bytes,
        })
    }
}
