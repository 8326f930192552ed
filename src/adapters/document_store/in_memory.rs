//! In-Memory Document Store Adapter
//!
//! Keeps collections in memory. Used for tests and offline development;
//! supports failure injection so callers' error paths can be exercised.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{
    merge_top_level, sort_documents, BatchDeleteReport, DocumentStore, DocumentStoreError,
    OrderBy, StoredDocument, WriteMode,
};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// In-memory document collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
    reads_failing: Arc<AtomicBool>,
    writes_failing: Arc<AtomicBool>,
    undeletable: Arc<RwLock<HashSet<String>>>,
    write_count: Arc<AtomicUsize>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Makes every read fail with `Unavailable`.
    pub fn fail_reads(&self, failing: bool) {
        self.reads_failing.store(failing, Ordering::SeqCst);
    }

    /// Makes every write and delete fail with `Unavailable`.
    pub fn fail_writes(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    /// Makes deletes of `id` fail, in any collection.
    pub async fn fail_delete_of(&self, id: impl Into<String>) {
        self.undeletable.write().await.insert(id.into());
    }

    /// Seeds a document without going through `set_one`.
    pub async fn insert(&self, collection: &str, id: &str, body: Value) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), body);
    }

    pub async fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Number of successful `set_one` calls.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<(), DocumentStoreError> {
        if self.reads_failing.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Unavailable("simulated read failure".into()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), DocumentStoreError> {
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Unavailable("simulated write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_all(
        &self,
        collection: &str,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError> {
        self.check_reads()?;
        let mut documents: Vec<StoredDocument> = self
            .collections
            .read()
            .await
            .get(collection)
            .map(|c| {
                c.iter()
                    .map(|(id, body)| StoredDocument::new(id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order_by) = order_by {
            sort_documents(&mut documents, &order_by);
        }
        Ok(documents)
    }

    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        self.check_reads()?;
        Ok(self
            .document(collection, id)
            .await
            .map(|body| StoredDocument::new(id, body)))
    }

    async fn set_one(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        mode: WriteMode,
    ) -> Result<(), DocumentStoreError> {
        self.check_writes()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(existing) if mode == WriteMode::Merge => merge_top_level(existing, body),
            _ => {
                docs.insert(id.to_string(), body);
            }
        }
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        self.check_writes()?;
        if self.undeletable.read().await.contains(id) {
            return Err(DocumentStoreError::Unavailable(format!(
                "simulated delete failure for {id}"
            )));
        }
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn delete_batch(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<BatchDeleteReport, DocumentStoreError> {
        self.check_writes()?;
        let mut report = BatchDeleteReport::default();
        for id in ids {
            match self.delete_one(collection, id).await {
                Ok(()) => report.deleted.push(id.clone()),
                Err(e) => report.failed.push((id.clone(), e.to_string())),
            }
        }
        Ok(report)
    }
}
