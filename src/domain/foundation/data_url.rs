//! `data:` URL codec for embedded raster images.
//!
//! Signature artifacts and compressed photos are embedded in draft payloads
//! as `data:<mime>;base64,<payload>` strings.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use thiserror::Error;

/// Errors raised while parsing a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("Not a data URL")]
    MissingScheme,

    #[error("Data URL is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parses `data:<mime>;base64,<payload>`.
    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingScheme)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(DataUrlError::NotBase64)?;
        let bytes = B64
            .decode(payload.as_bytes())
            .map_err(|e| DataUrlError::InvalidPayload(e.to_string()))?;
        Ok(Self::new(mime, bytes))
    }

    /// Renders the URL string.
    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime, B64.encode(&self.bytes))
    }
}
