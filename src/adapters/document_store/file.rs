//! File-based Document Store Adapter
//!
//! Stores each document as a JSON file on disk, one directory per
//! collection: `<base>/<collection>/<id>.json`. Useful for single-device
//! installs and for inspecting synced data by hand.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{
    merge_top_level, sort_documents, BatchDeleteReport, DocumentStore, DocumentStoreError,
    OrderBy, StoredDocument, WriteMode,
};

const EXTENSION: &str = "json";
const TMP_EXTENSION: &str = "json.tmp";

/// Document collections kept as JSON files.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    base_path: PathBuf,
}

impl FileDocumentStore {
    /// Create a store rooted at `base_path`. Directories are created lazily
    /// on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, DocumentStoreError> {
        check_key(collection)?;
        Ok(self.base_path.join(collection))
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf, DocumentStoreError> {
        check_key(id)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{id}.{EXTENSION}")))
    }

    async fn ensure_dir(&self, path: &Path) -> Result<(), DocumentStoreError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))
    }

    async fn read_document(&self, path: &Path, id: &str) -> Result<Option<Value>, DocumentStoreError> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DocumentStoreError::IoError(e.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DocumentStoreError::InvalidDocument {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Rejects keys that would escape the collection directory.
fn check_key(key: &str) -> Result<(), DocumentStoreError> {
    let bad = key.trim().is_empty()
        || key.contains(['/', '\\'])
        || key == "."
        || key == "..";
    if bad {
        return Err(DocumentStoreError::InvalidDocument {
            id: key.to_string(),
            reason: "key is not a valid file name".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get_all(
        &self,
        collection: &str,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DocumentStoreError::IoError(e.to_string())),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match self.read_document(&path, &id).await {
                Ok(Some(body)) => documents.push(StoredDocument::new(id, body)),
                Ok(None) => {}
                Err(DocumentStoreError::InvalidDocument { id, reason }) => {
                    tracing::warn!(collection, document_id = %id, "Skipping unreadable document: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        match order_by {
            Some(order_by) => sort_documents(&mut documents, &order_by),
            None => documents.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        Ok(documents)
    }

    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        let path = self.document_path(collection, id)?;
        Ok(self
            .read_document(&path, id)
            .await?
            .map(|body| StoredDocument::new(id, body)))
    }

    async fn set_one(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        mode: WriteMode,
    ) -> Result<(), DocumentStoreError> {
        let path = self.document_path(collection, id)?;
        self.ensure_dir(&self.collection_dir(collection)?).await?;

        let existing = match mode {
            WriteMode::Merge => match self.read_document(&path, id).await {
                Ok(existing) => existing,
                Err(DocumentStoreError::InvalidDocument { reason, .. }) => {
                    tracing::warn!(collection, document_id = id, "Overwriting unreadable document: {}", reason);
                    None
                }
                Err(e) => return Err(e),
            },
            WriteMode::Replace => None,
        };
        let body = match existing {
            Some(mut existing) => {
                merge_top_level(&mut existing, body);
                existing
            }
            None => body,
        };

        let json = serde_json::to_string_pretty(&body).map_err(|e| {
            DocumentStoreError::InvalidDocument {
                id: id.to_string(),
                reason: e.to_string(),
            }
        })?;

        // Write-then-rename so a crash never leaves a truncated document.
        let tmp = path.with_extension(TMP_EXTENSION);
        fs::write(&tmp, json)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| DocumentStoreError::IoError(e.to_string()))
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        let path = self.document_path(collection, id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DocumentStoreError::IoError(e.to_string())),
        }
    }

    async fn delete_batch(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<BatchDeleteReport, DocumentStoreError> {
        self.collection_dir(collection)?;
        let results = join_all(ids.iter().map(|id| self.delete_one(collection, id))).await;

        let mut report = BatchDeleteReport::default();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(()) => report.deleted.push(id.clone()),
                Err(e) => report.failed.push((id.clone(), e.to_string())),
            }
        }
        Ok(report)
    }
}
