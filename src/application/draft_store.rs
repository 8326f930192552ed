//! DraftStore - keyed persistence for in-progress documents.
//!
//! Every write is two-phase:
//!
//! 1. **Local commit** - the in-memory map and the local cache mirror are
//!    updated before the call returns, so `list_cached()` and the next
//!    `list()` reflect the write immediately.
//! 2. **Remote commit** - queued on the [`RemoteWriter`]. A failure is
//!    reported through the `WriteFailureNotifier` and never rolls back the
//!    local commit, so local and remote state may differ until the next
//!    successful write. There is no version check between devices: the
//!    last writer wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::draft::{sort_newest_first, Draft, DraftError, DraftType};
use crate::domain::foundation::{DraftId, ErrorCode, MonotonicClock};
use crate::ports::{DocumentStore, LocalCache, OrderBy, WriteFailureNotifier};

use super::remote_writer::{RemoteConfirmation, RemoteWriter, SyncTracker, WriteJob, WriteOutcome};

/// Remote field drafts are ordered by.
pub const LAST_MODIFIED_FIELD: &str = "lastModified";

/// Local cache key of the draft mirror.
pub const DRAFTS_CACHE_KEY: &str = "drafts";

/// Local cache key of the ids not yet confirmed by the remote store.
pub const DRAFT_SYNC_CACHE_KEY: &str = "draftSync";

/// Configuration for the DraftStore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStoreConfig {
    /// Remote collection holding drafts.
    pub collection: String,

    /// Payload keys nulled before remote persistence.
    pub stripped_fields: Vec<String>,

    pub cache_key: String,

    pub sync_cache_key: String,
}

impl Default for DraftStoreConfig {
    fn default() -> Self {
        Self {
            collection: "drafts".to_string(),
            stripped_fields: vec!["photos".to_string()],
            cache_key: DRAFTS_CACHE_KEY.to_string(),
            sync_cache_key: DRAFT_SYNC_CACHE_KEY.to_string(),
        }
    }
}

impl DraftStoreConfig {
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_stripped_fields(mut self, fields: Vec<String>) -> Self {
        self.stripped_fields = fields;
        self
    }
}

/// Result of a save: the effective id plus a handle on the remote write.
#[derive(Debug)]
pub struct SaveReceipt {
    pub id: DraftId,
    pub confirmation: RemoteConfirmation,
}

/// Outcome of a delete-by-project cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub project: String,
    pub deleted: Vec<DraftId>,
    pub failed: Vec<(DraftId, String)>,
}

impl CascadeReport {
    fn empty(project: &str) -> Self {
        Self {
            project: project.to_string(),
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

/// Shape of the draft mirror in the local cache.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheMirror {
    drafts: Vec<Draft>,
}

/// Repository owning the draft mirror and the remote collection.
pub struct DraftStore {
    remote: Arc<dyn DocumentStore>,
    cache: Arc<dyn LocalCache>,
    writer: RemoteWriter,
    drafts: RwLock<BTreeMap<DraftId, Draft>>,
    clock: MonotonicClock,
    config: DraftStoreConfig,
}

impl DraftStore {
    /// Creates the store, restoring the local mirror from `cache`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime; the remote writer task is
    /// spawned here.
    pub fn new(
        remote: Arc<dyn DocumentStore>,
        cache: Arc<dyn LocalCache>,
        notifier: Arc<dyn WriteFailureNotifier>,
        config: DraftStoreConfig,
    ) -> Self {
        let tracker = Arc::new(SyncTracker::journaled(
            Arc::clone(&cache),
            config.sync_cache_key.clone(),
        ));
        let clock = MonotonicClock::new();
        let drafts = restore_mirror(cache.as_ref(), &config.cache_key, &clock);
        let writer = RemoteWriter::spawn(
            Arc::clone(&remote),
            config.collection.clone(),
            notifier,
            tracker,
        );

        Self {
            remote,
            cache,
            writer,
            drafts: RwLock::new(drafts),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &DraftStoreConfig {
        &self.config
    }

    /// Creates (`id == None`) or updates a draft.
    ///
    /// The store assigns `lastModified`. Updating merges `{type, data,
    /// lastModified}` into the remote document, creating it if absent.
    ///
    /// # Errors
    ///
    /// - `InvalidPayload` if `data` is not a JSON object
    pub async fn save(
        &self,
        id: Option<DraftId>,
        draft_type: DraftType,
        data: Value,
    ) -> Result<SaveReceipt, DraftError> {
        if !data.is_object() {
            return Err(DraftError::invalid_payload("draft data must be a JSON object"));
        }
        let id = id.unwrap_or_else(DraftId::generate);

        let confirmation = {
            let mut drafts = self.drafts.write().await;
            // Stamped under the lock so local and queued order agree.
            let draft = Draft::new(id.clone(), draft_type, data, self.clock.next());
            let body = draft.to_document(&self.config.stripped_fields);
            drafts.insert(id.clone(), draft);
            let confirmation = self.writer.submit(WriteJob::Save {
                id: id.clone(),
                body,
            });
            self.persist(&drafts).await;
            confirmation
        };

        tracing::info!(draft_id = %id, draft_type = %draft_type, "Draft saved");
        Ok(SaveReceipt { id, confirmation })
    }

    /// Reads every remote draft, reconciles the local mirror with it and
    /// returns the result newest first.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the remote collection cannot be read; the
    ///   local mirror is left untouched and `list_cached()` still works
    pub async fn list(&self) -> Result<Vec<Draft>, DraftError> {
        let documents = self
            .remote
            .get_all(
                &self.config.collection,
                Some(OrderBy::descending(LAST_MODIFIED_FIELD)),
            )
            .await
            .map_err(|e| {
                tracing::warn!(collection = %self.config.collection, "Failed to list drafts: {}", e);
                DraftError::from(e)
            })?;

        let remote: Vec<Draft> = documents
            .iter()
            .filter_map(|doc| match Draft::from_document(&doc.id, &doc.body) {
                Ok(draft) => Some(draft),
                Err(e) => {
                    tracing::warn!("Skipping stored draft: {}", e);
                    None
                }
            })
            .collect();

        let mut drafts = self.drafts.write().await;
        *drafts = reconcile(&drafts, remote, self.writer.tracker());
        for draft in drafts.values() {
            self.clock.observe(draft.last_modified());
        }
        self.persist(&drafts).await;
        Ok(newest_first(drafts.values()))
    }

    /// The local mirror, newest first, without touching the remote store.
    pub async fn list_cached(&self) -> Vec<Draft> {
        newest_first(self.drafts.read().await.values())
    }

    /// Local copy of one draft, for resuming an edit.
    pub async fn get(&self, id: &DraftId) -> Option<Draft> {
        self.drafts.read().await.get(id).cloned()
    }

    /// Deletes one draft. Deleting an absent draft succeeds.
    ///
    /// The draft leaves the local mirror immediately; the call then waits
    /// for the remote delete.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the remote delete failed
    pub async fn delete(&self, id: &DraftId) -> Result<(), DraftError> {
        let confirmation = {
            let mut drafts = self.drafts.write().await;
            drafts.remove(id);
            let confirmation = self.writer.submit(WriteJob::Delete { id: id.clone() });
            self.persist(&drafts).await;
            confirmation
        };

        confirmation.wait().await?;
        tracing::info!(draft_id = %id, "Draft deleted");
        Ok(())
    }

    /// Deletes every draft whose `data.project` equals `project`.
    ///
    /// Best effort: per-draft remote failures are listed in the report and
    /// logged; successful deletes are not rolled back. Callers must gate
    /// this behind an explicit confirmation.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the drafts could not be listed; nothing is
    ///   deleted in that case
    pub async fn delete_by_project(&self, project: &str) -> Result<CascadeReport, DraftError> {
        let ids: Vec<DraftId> = self
            .list()
            .await?
            .into_iter()
            .filter(|draft| draft.belongs_to(project))
            .map(|draft| draft.id().clone())
            .collect();
        if ids.is_empty() {
            return Ok(CascadeReport::empty(project));
        }

        let confirmation = {
            let mut drafts = self.drafts.write().await;
            for id in &ids {
                drafts.remove(id);
            }
            let confirmation = self.writer.submit(WriteJob::DeleteBatch { ids: ids.clone() });
            self.persist(&drafts).await;
            confirmation
        };

        let failed: HashMap<String, String> = match confirmation.wait().await {
            Ok(WriteOutcome::Deleted(report)) => report.failed.into_iter().collect(),
            Ok(WriteOutcome::Written) => HashMap::new(),
            Err(e) => ids.iter().map(|id| (id.to_string(), e.to_string())).collect(),
        };
        let mut report = CascadeReport::empty(project);
        for id in ids {
            match failed.get(id.as_str()) {
                Some(reason) => report.failed.push((id, reason.clone())),
                None => report.deleted.push(id),
            }
        }

        if report.is_complete() {
            tracing::info!(project, deleted = report.deleted.len(), "Project drafts deleted");
        } else {
            tracing::warn!(
                project,
                code = %ErrorCode::PartialBatchFailure,
                deleted = report.deleted.len(),
                failed = report.failed.len(),
                "Project cascade delete partially failed"
            );
        }
        Ok(report)
    }

    /// Drafts of `draft_type` belonging to `project`, newest first.
    ///
    /// An empty result is not an error.
    pub async fn find_by_type_and_project(
        &self,
        draft_type: DraftType,
        project: &str,
    ) -> Result<Vec<Draft>, DraftError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|draft| draft.draft_type() == draft_type && draft.belongs_to(project))
            .collect())
    }

    /// Waits for every remote write queued so far.
    pub async fn flush(&self) -> Result<(), DraftError> {
        self.writer.flush().await
    }

    /// Writes the mirror to the local cache. Cache failures are logged only;
    /// the in-memory commit stands.
    ///
    /// Callers hold the mirror lock across this call so cache writes land in
    /// commit order. The write itself runs on the blocking pool.
    async fn persist(&self, drafts: &BTreeMap<DraftId, Draft>) {
        let mirror = CacheMirror {
            drafts: drafts.values().cloned().collect(),
        };
        let json = match serde_json::to_string(&mirror) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(code = %ErrorCode::CacheError, "Failed to encode draft cache: {}", e);
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let key = self.config.cache_key.clone();
        let result = tokio::task::spawn_blocking(move || cache.set(&key, &json))
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(code = %ErrorCode::CacheError, "Failed to update draft cache: {}", e);
        }
    }
}

fn restore_mirror(
    cache: &dyn LocalCache,
    key: &str,
    clock: &MonotonicClock,
) -> BTreeMap<DraftId, Draft> {
    let raw = match cache.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!("Failed to read draft cache: {}", e);
            return BTreeMap::new();
        }
    };
    let mirror: CacheMirror = match serde_json::from_str(&raw) {
        Ok(mirror) => mirror,
        Err(e) => {
            tracing::warn!("Ignoring unreadable draft cache: {}", e);
            return BTreeMap::new();
        }
    };

    let drafts: BTreeMap<DraftId, Draft> = mirror
        .drafts
        .into_iter()
        .map(|draft| (draft.id().clone(), draft))
        .collect();
    for draft in drafts.values() {
        clock.observe(draft.last_modified());
    }
    tracing::debug!(count = drafts.len(), "Restored draft mirror from cache");
    drafts
}

/// Merges a fresh remote listing into the local mirror.
///
/// - A remote draft replaces the local copy unless the local copy is at
///   least as new; the local copy keeps fields stripped remotely.
/// - A remote draft at least as new as the local copy settles the id, as
///   the remote store already holds that save.
/// - A remote draft with no local copy is skipped while a delete for it is
///   still queued.
/// - A local draft absent remotely survives only while its write is queued
///   or unconfirmed.
fn reconcile(
    local: &BTreeMap<DraftId, Draft>,
    remote: Vec<Draft>,
    tracker: &SyncTracker,
) -> BTreeMap<DraftId, Draft> {
    let mut merged = BTreeMap::new();
    for remote_draft in remote {
        let id = remote_draft.id().clone();
        match local.get(&id) {
            Some(local_draft) if local_draft.last_modified() > remote_draft.last_modified() => {
                merged.insert(id, local_draft.clone());
            }
            Some(local_draft) if local_draft.last_modified() == remote_draft.last_modified() => {
                tracker.settle(&id);
                merged.insert(id, local_draft.clone());
            }
            Some(_) => {
                tracker.settle(&id);
                merged.insert(id, remote_draft);
            }
            None if tracker.is_in_flight(&id) => {}
            None => {
                merged.insert(id, remote_draft);
            }
        }
    }
    for (id, draft) in local {
        if !merged.contains_key(id) && tracker.is_ahead(id) {
            merged.insert(id.clone(), draft.clone());
        }
    }
    merged
}

fn newest_first<'a>(drafts: impl Iterator<Item = &'a Draft>) -> Vec<Draft> {
    let mut sorted: Vec<Draft> = drafts.cloned().collect();
    sort_newest_first(&mut sorted);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CollectingFailureNotifier, InMemoryDocumentStore, InMemoryLocalCache};
    use crate::ports::RemoteOperation;
    use serde_json::json;

    struct Fixture {
        remote: InMemoryDocumentStore,
        cache: InMemoryLocalCache,
        notifier: CollectingFailureNotifier,
        store: DraftStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_cache(InMemoryLocalCache::new(), InMemoryDocumentStore::new())
        }

        fn with_cache(cache: InMemoryLocalCache, remote: InMemoryDocumentStore) -> Self {
            let notifier = CollectingFailureNotifier::new();
            let store = DraftStore::new(
                Arc::new(remote.clone()),
                Arc::new(cache.clone()),
                Arc::new(notifier.clone()),
                DraftStoreConfig::default(),
            );
            Self {
                remote,
                cache,
                notifier,
                store,
            }
        }

        async fn save(&self, draft_type: DraftType, data: Value) -> DraftId {
            let receipt = self.store.save(None, draft_type, data).await.unwrap();
            receipt.confirmation.wait().await.unwrap();
            receipt.id
        }
    }

    fn ids(drafts: &[Draft]) -> Vec<String> {
        drafts.iter().map(|d| d.id().to_string()).collect()
    }

    #[tokio::test]
    async fn save_with_returned_id_updates_in_place() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({"step": 1})).await;

        let receipt = f
            .store
            .save(Some(id.clone()), DraftType::SafetyTraining, json!({"step": 2}))
            .await
            .unwrap();
        assert_eq!(receipt.id, id);
        receipt.confirmation.wait().await.unwrap();

        let drafts = f.store.list().await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].data(), &json!({"step": 2}));
        assert_eq!(f.remote.count("drafts").await, 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_creates_document() {
        let f = Fixture::new();
        let id = DraftId::new("client-chosen").unwrap();
        f.store
            .save(Some(id), DraftType::MonthlyPlan, json!({}))
            .await
            .unwrap()
            .confirmation
            .wait()
            .await
            .unwrap();

        assert!(f.remote.document("drafts", "client-chosen").await.is_some());
    }

    #[tokio::test]
    async fn last_modified_is_assigned_and_increasing() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({})).await;
        let first = f.store.get(&id).await.unwrap().last_modified();

        f.store
            .save(Some(id.clone()), DraftType::SafetyTraining, json!({}))
            .await
            .unwrap();
        let second = f.store.get(&id).await.unwrap().last_modified();
        assert!(second > first);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let f = Fixture::new();
        let a = f.save(DraftType::SafetyTraining, json!({})).await;
        let b = f.save(DraftType::MonthlyPlan, json!({})).await;
        let c = f.save(DraftType::NewcomerSurvey, json!({})).await;

        let drafts = f.store.list().await.unwrap();
        assert_eq!(ids(&drafts), vec![c.to_string(), b.to_string(), a.to_string()]);
    }

    #[tokio::test]
    async fn non_object_payload_is_rejected() {
        let f = Fixture::new();
        let err = f
            .store
            .save(None, DraftType::SafetyTraining, json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, DraftError::InvalidPayload(_)));
        assert!(f.store.list_cached().await.is_empty());
    }

    #[tokio::test]
    async fn failed_remote_save_keeps_local_state_and_notifies() {
        let f = Fixture::new();
        f.remote.fail_writes(true);

        let receipt = f
            .store
            .save(None, DraftType::SafetyTraining, json!({"project": "P"}))
            .await
            .unwrap();
        // Visible locally before the remote write resolves.
        assert_eq!(f.store.list_cached().await.len(), 1);

        assert!(receipt.confirmation.wait().await.is_err());
        let failures = f.notifier.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].operation, RemoteOperation::Save);

        // Not rolled back, even after reconciling with a remote that lacks it.
        let drafts = f.store.list().await.unwrap();
        assert_eq!(ids(&drafts), vec![receipt.id.to_string()]);
    }

    #[tokio::test]
    async fn unreadable_remote_fails_list_but_not_cache() {
        let f = Fixture::new();
        f.save(DraftType::SafetyTraining, json!({})).await;
        f.remote.fail_reads(true);

        assert!(matches!(
            f.store.list().await,
            Err(DraftError::StoreUnavailable(_))
        ));
        assert_eq!(f.store.list_cached().await.len(), 1);
    }

    #[tokio::test]
    async fn stripped_fields_are_nulled_remotely_only() {
        let f = Fixture::new();
        let id = f
            .save(
                DraftType::SafetyTraining,
                json!({"project": "P", "photos": ["data:image/jpeg;base64,AAAA"]}),
            )
            .await;

        let remote = f.remote.document("drafts", id.as_str()).await.unwrap();
        assert!(remote["data"]["photos"].is_null());
        assert!(remote["data"].get("photos").is_some());

        let local = f.store.list().await.unwrap();
        assert_eq!(local[0].data()["photos"][0], "data:image/jpeg;base64,AAAA");
    }

    #[tokio::test]
    async fn newer_remote_copy_wins() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({"by": "me"})).await;
        let mine = f.store.get(&id).await.unwrap().last_modified().as_millis();

        f.remote
            .insert(
                "drafts",
                id.as_str(),
                json!({"type": "safety_training", "data": {"by": "other"}, "lastModified": mine + 1000}),
            )
            .await;

        let drafts = f.store.list().await.unwrap();
        assert_eq!(drafts[0].data()["by"], "other");
    }

    #[tokio::test]
    async fn remotely_deleted_draft_disappears() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({})).await;
        f.remote.delete_one("drafts", id.as_str()).await.unwrap();

        assert!(f.store.list().await.unwrap().is_empty());
        assert!(f.store.list_cached().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_remote_documents_are_skipped() {
        let f = Fixture::new();
        f.remote.insert("drafts", "junk", json!({"nope": true})).await;
        f.save(DraftType::MonthlyPlan, json!({})).await;

        assert_eq!(f.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({})).await;

        f.store.delete(&id).await.unwrap();
        f.store.delete(&id).await.unwrap();
        assert!(f.store.list().await.unwrap().is_empty());
        assert_eq!(f.remote.count("drafts").await, 0);
    }

    #[tokio::test]
    async fn delete_reports_remote_failure() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({})).await;
        f.remote.fail_writes(true);

        assert!(f.store.delete(&id).await.is_err());
        assert!(f.store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn delete_by_project_removes_only_that_project() {
        let f = Fixture::new();
        for _ in 0..3 {
            f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;
        }
        for project in ["Y", "Z"] {
            f.save(DraftType::MonthlyPlan, json!({"project": project})).await;
        }
        f.save(DraftType::NewcomerSurvey, json!({})).await;

        let report = f.store.delete_by_project("X").await.unwrap();
        assert!(report.is_complete());
        assert_eq!(report.deleted.len(), 3);

        let remaining = f.store.list().await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|d| !d.belongs_to("X")));
    }

    #[tokio::test]
    async fn delete_by_project_keeps_successful_deletes_on_partial_failure() {
        let f = Fixture::new();
        let a = f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;
        let b = f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;
        f.remote.fail_delete_of(b.as_str()).await;

        let report = f.store.delete_by_project("X").await.unwrap();
        assert_eq!(report.deleted, vec![a.clone()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, b);
        assert_eq!(report.attempted(), 2);
        assert!(f.remote.document("drafts", a.as_str()).await.is_none());
    }

    #[tokio::test]
    async fn delete_by_unknown_project_is_empty() {
        let f = Fixture::new();
        f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;

        let report = f.store.delete_by_project("nobody").await.unwrap();
        assert_eq!(report.attempted(), 0);
        assert_eq!(f.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_type_and_project_filters() {
        let f = Fixture::new();
        let plan = f.save(DraftType::MonthlyPlan, json!({"project": "X"})).await;
        f.save(DraftType::MonthlyPlan, json!({"project": "Y"})).await;
        f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;

        let found = f
            .store
            .find_by_type_and_project(DraftType::MonthlyPlan, "X")
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![plan.to_string()]);

        assert!(f
            .store
            .find_by_type_and_project(DraftType::SafetyCouncil, "X")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn mirror_is_restored_from_cache() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({"photos": ["big"]})).await;

        let reopened = Fixture::with_cache(f.cache.clone(), InMemoryDocumentStore::new());
        let drafts = reopened.store.list_cached().await;
        assert_eq!(ids(&drafts), vec![id.to_string()]);
        assert_eq!(drafts[0].data()["photos"][0], "big");
    }

    #[tokio::test]
    async fn unconfirmed_drafts_survive_restart_and_reconcile() {
        let f = Fixture::new();
        f.remote.fail_writes(true);
        let receipt = f
            .store
            .save(None, DraftType::SafetyTraining, json!({}))
            .await
            .unwrap();
        let _ = receipt.confirmation.wait().await;

        let reopened = Fixture::with_cache(f.cache.clone(), InMemoryDocumentStore::new());
        let drafts = reopened.store.list().await.unwrap();
        assert_eq!(ids(&drafts), vec![receipt.id.to_string()]);
    }

    #[tokio::test]
    async fn confirmed_draft_deleted_remotely_is_dropped_after_restart() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({"project": "X"})).await;
        let (cache, remote) = (f.cache.clone(), f.remote.clone());
        drop(f);

        remote.delete_one("drafts", id.as_str()).await.unwrap();

        let reopened = Fixture::with_cache(cache, remote);
        assert_eq!(reopened.store.list_cached().await.len(), 1);
        assert!(reopened.store.list().await.unwrap().is_empty());
        assert!(reopened.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn restored_mark_settles_when_remote_holds_the_save() {
        let f = Fixture::new();
        let id = f.save(DraftType::SafetyTraining, json!({})).await;
        let (cache, remote) = (f.cache.clone(), f.remote.clone());
        drop(f);

        // As left by a run that stopped before the write was confirmed.
        cache
            .set(DRAFT_SYNC_CACHE_KEY, &serde_json::to_string(&[&id]).unwrap())
            .unwrap();

        let reopened = Fixture::with_cache(cache, remote.clone());
        assert!(reopened.store.writer.tracker().is_unsynced(&id));
        assert_eq!(reopened.store.list().await.unwrap().len(), 1);
        assert!(!reopened.store.writer.tracker().is_ahead(&id));

        remote.delete_one("drafts", id.as_str()).await.unwrap();
        assert!(reopened.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn newer_local_copy_stays_unsynced() {
        let f = Fixture::new();
        f.remote.fail_writes(true);
        let receipt = f
            .store
            .save(None, DraftType::SafetyTraining, json!({}))
            .await
            .unwrap();
        let _ = receipt.confirmation.wait().await;
        let mine = f.store.get(&receipt.id).await.unwrap().last_modified().as_millis();
        f.remote
            .insert(
                "drafts",
                receipt.id.as_str(),
                json!({"type": "safety_training", "data": {}, "lastModified": mine - 1}),
            )
            .await;

        f.store.list().await.unwrap();
        assert!(f.store.writer.tracker().is_unsynced(&receipt.id));
    }

    #[tokio::test]
    async fn cache_write_failure_does_not_fail_save() {
        let f = Fixture::new();
        f.cache.fail_writes(true);

        let id = f.save(DraftType::SafetyTraining, json!({})).await;
        assert!(f.store.get(&id).await.is_some());
    }
}
