//! Signature artifact: the cropped, encoded result of a capture session.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::domain::foundation::DataUrl;

use super::errors::CaptureError;

/// PNG-encoded signature.
///
/// Carries no reference back to the session that produced it; once embedded
/// in a draft payload it is just an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArtifact {
    pub width: u32,
    pub height: u32,
    /// Row of the backing surface the crop started at.
    pub source_offset: u32,
    pub png: Vec<u8>,
}

impl SignatureArtifact {
    pub(crate) fn encode(image: RgbaImage, source_offset: u32) -> Result<Self, CaptureError> {
        let (width, height) = image.dimensions();
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(Self {
            width,
            height,
            source_offset,
            png,
        })
    }

    /// Renders the artifact as `data:image/png;base64,...`.
    pub fn to_data_url(&self) -> String {
        DataUrl::new("image/png", self.png.clone()).encode()
    }
}
