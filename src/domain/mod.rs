//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, error codes, data URLs)
//! - `signature` - Pointer-driven signature capture and cropped export
//! - `draft` - Resumable in-progress documents
//! - `master_data` - Shared pick-list registry

pub mod draft;
pub mod foundation;
pub mod master_data;
pub mod signature;
