//! Error vocabulary shared by the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error kinds surfaced to callers.
///
/// Every area error maps onto one of these so the presentation layer can
/// pick a message without matching on each concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Remote document store could not be read or written.
    StoreUnavailable,
    /// A required precondition was missing; the action was refused.
    ValidationSkipped,
    /// Some documents of a batch delete failed.
    PartialBatchFailure,
    /// Input bytes were not a decodable image.
    DecodeFailure,
    /// Raster could not be encoded.
    EncodeFailure,
    NotFound,
    SerializationFailed,
    CacheError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::ValidationSkipped => "VALIDATION_SKIPPED",
            ErrorCode::PartialBatchFailure => "PARTIAL_BATCH_FAILURE",
            ErrorCode::DecodeFailure => "DECODE_FAILURE",
            ErrorCode::EncodeFailure => "ENCODE_FAILURE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::SerializationFailed => "SERIALIZATION_FAILED",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(s)
    }
}
