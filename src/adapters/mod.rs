//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `document_store` - remote document collections (in-memory, JSON files)
//! - `cache` - local persistent cache (in-memory, JSON file)
//! - `image` - photo compression (JPEG)
//! - `notify` - background write failure sinks

pub mod cache;
pub mod document_store;
pub mod image;
pub mod notify;

pub use cache::{FileLocalCache, InMemoryLocalCache};
pub use document_store::{FileDocumentStore, InMemoryDocumentStore};
pub use image::JpegCompressor;
pub use notify::{CollectingFailureNotifier, LoggingFailureNotifier};
