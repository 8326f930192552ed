//! Draft-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::ports::{DocumentStoreError, LocalCacheError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Remote collection could not be read or written.
    #[error("Draft store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored document did not have the draft shape.
    #[error("Malformed draft '{id}': {reason}")]
    Malformed { id: String, reason: String },

    #[error("Invalid draft payload: {0}")]
    InvalidPayload(String),

    #[error("Local cache error: {0}")]
    Cache(String),

    /// The background remote writer is gone (runtime shut down).
    #[error("Remote writer stopped")]
    WriterStopped,
}

impl DraftError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        DraftError::Malformed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        DraftError::InvalidPayload(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DraftError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            DraftError::Malformed { .. } => ErrorCode::SerializationFailed,
            DraftError::InvalidPayload(_) => ErrorCode::ValidationSkipped,
            DraftError::Cache(_) => ErrorCode::CacheError,
            DraftError::WriterStopped => ErrorCode::InternalError,
        }
    }
}

impl From<DocumentStoreError> for DraftError {
    fn from(err: DocumentStoreError) -> Self {
        DraftError::StoreUnavailable(err.to_string())
    }
}

impl From<LocalCacheError> for DraftError {
    fn from(err: LocalCacheError) -> Self {
        DraftError::Cache(err.to_string())
    }
}
