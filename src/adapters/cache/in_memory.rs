//! In-Memory Local Cache Adapter
//!
//! Keeps cached values in a process-local map. Useful for testing and for
//! hosts without persistent storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::ports::{LocalCache, LocalCacheError};

/// In-memory string cache
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
    writes_failing: Arc<AtomicBool>,
}

impl InMemoryLocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Makes `set` and `remove` fail, as a full or read-only disk would.
    pub fn fail_writes(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writes(&self) -> Result<(), LocalCacheError> {
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(LocalCacheError::IoError("simulated cache write failure".into()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> LocalCacheError {
    LocalCacheError::IoError("cache lock poisoned".to_string())
}

impl LocalCache for InMemoryLocalCache {
    fn get(&self, key: &str) -> Result<Option<String>, LocalCacheError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalCacheError> {
        self.check_writes()?;
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalCacheError> {
        self.check_writes()?;
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}
