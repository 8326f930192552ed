//! MasterDataStore - the single pick-list document.
//!
//! Reads never fail: when the remote document cannot be read the cached
//! copy is used, and when neither exists the built-in defaults are. Writes
//! replace the whole document; callers read-modify-write.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::ErrorCode;
use crate::domain::master_data::{MasterData, MasterDataError};
use crate::ports::{DocumentStore, LocalCache, WriteMode};

/// Local cache key of the master data mirror.
pub const MASTER_DATA_CACHE_KEY: &str = "masterData";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterDataStoreConfig {
    pub collection: String,
    pub document_id: String,
    pub cache_key: String,
}

impl Default for MasterDataStoreConfig {
    fn default() -> Self {
        Self {
            collection: "master_data".to_string(),
            document_id: "default".to_string(),
            cache_key: MASTER_DATA_CACHE_KEY.to_string(),
        }
    }
}

/// Repository for the master data document.
pub struct MasterDataStore {
    remote: Arc<dyn DocumentStore>,
    cache: Arc<dyn LocalCache>,
    config: MasterDataStoreConfig,
}

impl MasterDataStore {
    pub fn new(
        remote: Arc<dyn DocumentStore>,
        cache: Arc<dyn LocalCache>,
        config: MasterDataStoreConfig,
    ) -> Self {
        Self {
            remote,
            cache,
            config,
        }
    }

    /// Returns the stored document, the cached copy, or the built-in
    /// defaults, in that order of preference.
    pub async fn get(&self) -> MasterData {
        match self
            .remote
            .get_one(&self.config.collection, &self.config.document_id)
            .await
        {
            Ok(Some(doc)) => match serde_json::from_value::<MasterData>(doc.body) {
                Ok(data) => {
                    self.write_cache(&data);
                    return data;
                }
                Err(e) => tracing::warn!("Stored master data is unreadable: {}", e),
            },
            Ok(None) => tracing::debug!("No master data stored yet"),
            Err(e) => tracing::warn!(
                code = %ErrorCode::StoreUnavailable,
                "Failed to read master data: {}",
                e
            ),
        }
        self.read_cache().unwrap_or_else(MasterData::builtin)
    }

    /// The cached copy (or defaults) without touching the remote store.
    pub fn get_cached(&self) -> MasterData {
        self.read_cache().unwrap_or_else(MasterData::builtin)
    }

    /// Overwrites the whole document.
    ///
    /// The cache is updated first so later reads see `data` even if the
    /// remote write fails.
    ///
    /// # Errors
    ///
    /// - `Serialization` if `data` cannot be encoded
    /// - `StoreUnavailable` if the remote write failed
    pub async fn replace(&self, data: &MasterData) -> Result<(), MasterDataError> {
        let body: Value = serde_json::to_value(data)
            .map_err(|e| MasterDataError::Serialization(e.to_string()))?;
        self.write_cache(data);

        self.remote
            .set_one(
                &self.config.collection,
                &self.config.document_id,
                body,
                WriteMode::Replace,
            )
            .await
            .map_err(|e| {
                tracing::warn!("Failed to write master data: {}", e);
                MasterDataError::from(e)
            })?;
        tracing::info!("Master data replaced");
        Ok(())
    }

    /// Reads the document, applies `change` and writes it back when
    /// `change` reports a modification. Returns the resulting document.
    pub async fn modify<F>(&self, change: F) -> Result<MasterData, MasterDataError>
    where
        F: FnOnce(&mut MasterData) -> bool,
    {
        let mut data = self.get().await;
        if change(&mut data) {
            self.replace(&data).await?;
        }
        Ok(data)
    }

    fn read_cache(&self) -> Option<MasterData> {
        let raw = match self.cache.get(&self.config.cache_key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read master data cache: {}", e);
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!("Ignoring unreadable master data cache: {}", e))
            .ok()
    }

    fn write_cache(&self, data: &MasterData) {
        let result = serde_json::to_string(data)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.cache
                    .set(&self.config.cache_key, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            tracing::warn!(code = %ErrorCode::CacheError, "Failed to update master data cache: {}", e);
        }
    }
}
