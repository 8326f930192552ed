//! Local Cache Port - synchronous string-keyed persistent store.
//!
//! Mirrors the last-known remote state so reads stay fast and keep working
//! while the remote store is unreachable. Values are opaque strings (JSON in
//! practice).

/// Errors raised by local cache adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalCacheError {
    #[error("Cache IO error: {0}")]
    IoError(String),

    #[error("Cache file is corrupt: {0}")]
    Corrupt(String),
}

/// Port for the local persistent cache.
pub trait LocalCache: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, LocalCacheError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), LocalCacheError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), LocalCacheError>;
}
