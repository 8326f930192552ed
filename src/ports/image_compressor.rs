//! Image Compressor Port - bounds the size of photo attachments.

use crate::domain::foundation::{DataUrl, ErrorCode};

/// Errors that can occur while compressing an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompressionError {
    /// Input is not a decodable image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl CompressionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompressionError::Decode(_) => ErrorCode::DecodeFailure,
            CompressionError::Encode(_) => ErrorCode::EncodeFailure,
        }
    }
}

/// A re-encoded raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn to_data_url(&self) -> String {
        DataUrl::new(self.mime, self.bytes.clone()).encode()
    }
}

/// Port for photo compression.
///
/// Implementations must be deterministic: identical input yields identical
/// output for fixed settings.
pub trait ImageCompressor: Send + Sync {
    /// Decodes `input`, scales it down to the configured width cap keeping
    /// the aspect ratio, and re-encodes it lossily.
    fn compress(&self, input: &[u8]) -> Result<EncodedImage, CompressionError>;

    /// Same as [`compress`](Self::compress) for a `data:` URL input.
    fn compress_data_url(&self, input: &str) -> Result<EncodedImage, CompressionError> {
        let url = DataUrl::parse(input).map_err(|e| CompressionError::Decode(e.to_string()))?;
        self.compress(&url.bytes)
    }
}
