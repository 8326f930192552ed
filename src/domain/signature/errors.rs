//! Capture engine errors.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Capture surface is already open")]
    AlreadyOpen,

    #[error("Invalid capture transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Failed to encode signature: {0}")]
    Encode(String),
}

impl CaptureError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CaptureError::AlreadyOpen | CaptureError::InvalidTransition(_) => {
                ErrorCode::ValidationSkipped
            }
            CaptureError::Encode(_) => ErrorCode::EncodeFailure,
        }
    }
}
