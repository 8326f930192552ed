//! AttachPhotoHandler - compresses a photo into a draft payload.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::draft::{payload, DraftError};
use crate::domain::foundation::ErrorCode;
use crate::ports::{CompressionError, ImageCompressor};

/// Raw photo as delivered by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Bytes(Vec<u8>),
    DataUrl(String),
}

/// Command to attach a photo to the array at `data[field]`.
#[derive(Debug, Clone)]
pub struct AttachPhotoCommand {
    pub field: String,
    pub photo: PhotoSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachPhotoResult {
    /// Number of photos in the field after the append.
    pub count: usize,
    pub width: u32,
    pub height: u32,
    pub encoded_size: usize,
}

#[derive(Debug, Error)]
pub enum AttachPhotoError {
    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    Payload(#[from] DraftError),
}

impl AttachPhotoError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AttachPhotoError::Compression(e) => e.code(),
            AttachPhotoError::Payload(e) => e.code(),
        }
    }
}

/// Handler for attaching photos to an in-memory draft payload.
pub struct AttachPhotoHandler {
    compressor: Arc<dyn ImageCompressor>,
}

impl AttachPhotoHandler {
    pub fn new(compressor: Arc<dyn ImageCompressor>) -> Self {
        Self { compressor }
    }

    /// Compresses the photo and appends its data URL to `data[field]`.
    /// `data` is untouched when compression fails.
    pub fn handle(
        &self,
        data: &mut Value,
        cmd: AttachPhotoCommand,
    ) -> Result<AttachPhotoResult, AttachPhotoError> {
        let encoded = match &cmd.photo {
            PhotoSource::Bytes(bytes) => self.compressor.compress(bytes)?,
            PhotoSource::DataUrl(url) => self.compressor.compress_data_url(url)?,
        };
        let count = payload::append_to_array(data, &cmd.field, Value::String(encoded.to_data_url()))?;

        tracing::debug!(field = %cmd.field, count, size = encoded.bytes.len(), "Photo attached");
        Ok(AttachPhotoResult {
            count,
            width: encoded.width,
            height: encoded.height,
            encoded_size: encoded.bytes.len(),
        })
    }
}
