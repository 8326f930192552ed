//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error codes and the data URL codec
//! that form the vocabulary of the safety-forms domain.

mod data_url;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use data_url::{DataUrl, DataUrlError};
pub use errors::{ErrorCode, ValidationError};
pub use ids::DraftId;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::{MonotonicClock, Timestamp};
