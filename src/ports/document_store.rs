//! Document Store Port - Interface to the remote keyed document collection.
//!
//! Any networked document database offering these primitives will do:
//! read all documents of a collection (optionally ordered), read one, write
//! one (replace or merge), delete one, and delete a batch.

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur talking to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// Network, permission or backend failure.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid document '{id}': {reason}")]
    InvalidDocument { id: String, reason: String },

    #[error("IO error: {0}")]
    IoError(String),
}

/// A stored document: its key plus its body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self { id: id.into(), body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering applied by `get_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// How `set_one` treats an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the whole document.
    Replace,
    /// Overwrite only the top-level fields present in the new body,
    /// creating the document if absent.
    Merge,
}

/// Outcome of a best-effort batch delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchDeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Port for the remote document collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read every document of `collection`.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the collection cannot be read.
    async fn get_all(
        &self,
        collection: &str,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError>;

    /// Read one document; `Ok(None)` if absent.
    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DocumentStoreError>;

    /// Write one document.
    async fn set_one(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        mode: WriteMode,
    ) -> Result<(), DocumentStoreError>;

    /// Delete one document. Deleting an absent document succeeds.
    async fn delete_one(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError>;

    /// Delete several documents, best effort.
    ///
    /// Per-document failures are reported in the returned report, not as
    /// `Err`; `Err` means the batch could not be attempted at all.
    async fn delete_batch(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<BatchDeleteReport, DocumentStoreError>;
}

/// Shallow merge used by [`WriteMode::Merge`]: top-level keys of `patch`
/// overwrite those of `base`; nested objects are replaced, not merged.
pub fn merge_top_level(base: &mut Value, patch: Value) {
    match patch {
        Value::Object(fields) if base.is_object() => {
            if let Some(target) = base.as_object_mut() {
                for (key, value) in fields {
                    target.insert(key, value);
                }
            }
        }
        other => *base = other,
    }
}

/// Orders documents by a top-level field as `get_all` adapters do.
///
/// Numbers compare numerically and strings lexically; documents missing
/// the field sort last.
pub fn sort_documents(documents: &mut [StoredDocument], order_by: &OrderBy) {
    use std::cmp::Ordering;

    fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    documents.sort_by(|a, b| {
        let (fa, fb) = (a.body.get(&order_by.field), b.body.get(&order_by.field));
        match (fa, fb, order_by.direction) {
            (Some(_), Some(_), SortDirection::Descending) => compare(fb, fa),
            _ => compare(fa, fb),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_only_given_keys() {
        let mut base = json!({"type": "a", "data": {"x": 1, "y": 2}, "keep": true});
        merge_top_level(&mut base, json!({"type": "b", "data": {"x": 3}}));
        assert_eq!(base, json!({"type": "b", "data": {"x": 3}, "keep": true}));
    }

    #[test]
    fn merge_into_non_object_replaces() {
        let mut base = Value::Null;
        merge_top_level(&mut base, json!({"a": 1}));
        assert_eq!(base, json!({"a": 1}));
    }

    #[test]
    fn sorts_descending_with_missing_last() {
        let mut docs = vec![
            StoredDocument::new("a", json!({"lastModified": 1})),
            StoredDocument::new("b", json!({})),
            StoredDocument::new("c", json!({"lastModified": 3})),
        ];
        sort_documents(&mut docs, &OrderBy::descending("lastModified"));
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn sorts_ascending() {
        let mut docs = vec![
            StoredDocument::new("a", json!({"name": "z"})),
            StoredDocument::new("b", json!({"name": "m"})),
        ];
        sort_documents(&mut docs, &OrderBy::ascending("name"));
        assert_eq!(docs[0].id, "b");
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = DocumentStoreError::Unavailable("permission denied".into());
        assert!(err.to_string().contains("permission denied"));
    }
}
