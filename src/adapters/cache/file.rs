//! File-based Local Cache Adapter
//!
//! Persists every key in a single JSON object file. The whole file is
//! rewritten on each change, which suits the handful of keys the stores use.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::{LocalCache, LocalCacheError};

type Entries = BTreeMap<String, String>;

/// JSON-file backed cache
#[derive(Debug)]
pub struct FileLocalCache {
    path: PathBuf,
    // Serialises read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl FileLocalCache {
    /// Create a cache persisted at `path`. The file and its parent
    /// directory are created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, LocalCacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(LocalCacheError::IoError(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| LocalCacheError::Corrupt(e.to_string()))
    }

    fn store(&self, entries: &Entries) -> Result<(), LocalCacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| LocalCacheError::IoError(e.to_string()))?;
        }
        let json =
            serde_json::to_string(entries).map_err(|e| LocalCacheError::IoError(e.to_string()))?;

        // Replace atomically.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| LocalCacheError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| LocalCacheError::IoError(e.to_string()))
    }

    fn update<F>(&self, change: F) -> Result<(), LocalCacheError>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| LocalCacheError::IoError("cache lock poisoned".to_string()))?;
        let mut entries = self.load()?;
        change(&mut entries);
        self.store(&entries)
    }
}

impl LocalCache for FileLocalCache {
    fn get(&self, key: &str) -> Result<Option<String>, LocalCacheError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalCacheError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), LocalCacheError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
