//! Draft module - persisted, resumable in-progress documents.

mod aggregate;
mod document_type;
mod errors;
pub mod payload;

pub use aggregate::{sort_newest_first, Draft};
pub use document_type::DraftType;
pub use errors::DraftError;
