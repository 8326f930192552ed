//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - remote keyed document collection (async)
//! - `LocalCache` - synchronous string-keyed persistent cache
//! - `ImageCompressor` - photo downsampling and re-encoding
//! - `WriteFailureNotifier` - sink for failed background remote writes

mod document_store;
mod image_compressor;
mod local_cache;
mod write_failure_notifier;

pub use document_store::{
    merge_top_level, sort_documents, BatchDeleteReport, DocumentStore, DocumentStoreError,
    OrderBy, SortDirection, StoredDocument, WriteMode,
};
pub use image_compressor::{CompressionError, EncodedImage, ImageCompressor};
pub use local_cache::{LocalCache, LocalCacheError};
pub use write_failure_notifier::{RemoteOperation, RemoteWriteFailure, WriteFailureNotifier};
