//! Master data error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::ports::DocumentStoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasterDataError {
    #[error("Master data store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to serialize master data: {0}")]
    Serialization(String),
}

impl MasterDataError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MasterDataError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            MasterDataError::Serialization(_) => ErrorCode::SerializationFailed,
        }
    }
}

impl From<DocumentStoreError> for MasterDataError {
    fn from(err: DocumentStoreError) -> Self {
        MasterDataError::StoreUnavailable(err.to_string())
    }
}
