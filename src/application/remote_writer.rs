//! RemoteWriter - background task applying draft writes to the remote store.
//!
//! Local state is committed before the remote write is attempted. Every
//! remote mutation is queued here and applied by a single task, so writes
//! to the same id reach the remote store in the order they were issued
//! (last writer wins). Failures are handed to the `WriteFailureNotifier`
//! and never roll back local state.
//!
//! ## Sync Tracking
//!
//! The writer keeps a [`SyncTracker`] that the draft store consults when
//! reconciling its local mirror with the remote collection:
//!
//! | State | Meaning |
//! |-------|---------|
//! | in flight | a queued write for the id has not completed yet |
//! | unsynced | the latest save for the id has not been confirmed |
//!
//! A journaled tracker keeps both sets in the local cache, so a restart
//! neither forgets an unconfirmed save nor keeps a confirmed one pinned.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, ErrorCode};
use crate::ports::{
    BatchDeleteReport, DocumentStore, LocalCache, RemoteOperation, RemoteWriteFailure,
    WriteFailureNotifier, WriteMode,
};

/// A remote mutation.
#[derive(Debug, Clone)]
pub(crate) enum WriteJob {
    /// Merge `body` into the document at `id`.
    Save { id: DraftId, body: Value },
    Delete { id: DraftId },
    DeleteBatch { ids: Vec<DraftId> },
    /// Completes once every earlier job has completed.
    Flush,
}

impl WriteJob {
    fn ids(&self) -> Vec<DraftId> {
        match self {
            WriteJob::Save { id, .. } | WriteJob::Delete { id } => vec![id.clone()],
            WriteJob::DeleteBatch { ids } => ids.clone(),
            WriteJob::Flush => Vec::new(),
        }
    }
}

/// Result of one job as seen by whoever awaits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Deleted(BatchDeleteReport),
}

struct Envelope {
    job: WriteJob,
    reply: oneshot::Sender<Result<WriteOutcome, DraftError>>,
}

/// Handle on the completion of one queued remote write.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct RemoteConfirmation {
    receiver: oneshot::Receiver<Result<WriteOutcome, DraftError>>,
}

impl RemoteConfirmation {
    /// Waits for the remote write to complete.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the remote store rejected the write
    /// - `WriterStopped` if the background task is gone
    pub async fn wait(self) -> Result<WriteOutcome, DraftError> {
        self.receiver.await.map_err(|_| DraftError::WriterStopped)?
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    in_flight: HashMap<DraftId, usize>,
    unsynced: HashSet<DraftId>,
}

impl TrackerState {
    /// Ids whose local copy may be ahead of the remote store, sorted.
    fn ahead(&self) -> Vec<DraftId> {
        let mut ids: Vec<DraftId> = self
            .in_flight
            .keys()
            .chain(self.unsynced.iter())
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        ids.sort();
        ids
    }
}

/// Local cache entry recording which ids were ahead of the remote store,
/// so the marks survive a restart. Rewritten on every change.
struct SyncJournal {
    cache: Arc<dyn LocalCache>,
    key: String,
}

impl SyncJournal {
    fn load(&self) -> Vec<DraftId> {
        let raw = match self.cache.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read draft sync journal: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable draft sync journal: {}", e);
            Vec::new()
        })
    }

    fn store(&self, ids: &[DraftId]) {
        let result = serde_json::to_string(ids)
            .map_err(|e| e.to_string())
            .and_then(|json| self.cache.set(&self.key, &json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(code = %ErrorCode::CacheError, "Failed to update draft sync journal: {}", e);
        }
    }
}

/// Per-id bookkeeping of queued and unconfirmed writes.
#[derive(Default)]
pub struct SyncTracker {
    state: Mutex<TrackerState>,
    journal: Option<SyncJournal>,
}

impl std::fmt::Debug for SyncTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncTracker")
            .field("journal", &self.journal.as_ref().map(|j| &j.key))
            .finish_non_exhaustive()
    }
}

impl SyncTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker whose marks are kept in `cache` under `key`. Marks left by
    /// an earlier run are restored as unsynced.
    pub fn journaled(cache: Arc<dyn LocalCache>, key: impl Into<String>) -> Self {
        let journal = SyncJournal {
            cache,
            key: key.into(),
        };
        let restored = journal.load();
        if !restored.is_empty() {
            tracing::debug!(count = restored.len(), "Restored unsynced draft marks");
        }
        Self {
            state: Mutex::new(TrackerState {
                in_flight: HashMap::new(),
                unsynced: restored.into_iter().collect(),
            }),
            journal: Some(journal),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut TrackerState) -> R) -> R {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *state)
    }

    /// Applies `change` and rewrites the journal while still holding the
    /// lock, so journal writes land in the order the changes happened.
    fn update(&self, change: impl FnOnce(&mut TrackerState)) {
        self.with_state(|s| {
            let before = s.ahead();
            change(s);
            let after = s.ahead();
            if let Some(journal) = &self.journal {
                if before != after {
                    journal.store(&after);
                }
            }
        });
    }

    /// True while a queued write for `id` has not completed.
    pub fn is_in_flight(&self, id: &DraftId) -> bool {
        self.with_state(|s| s.in_flight.contains_key(id))
    }

    /// True if the latest save for `id` has not been confirmed.
    pub fn is_unsynced(&self, id: &DraftId) -> bool {
        self.with_state(|s| s.unsynced.contains(id))
    }

    /// True if local state for `id` may be ahead of the remote store.
    pub fn is_ahead(&self, id: &DraftId) -> bool {
        self.with_state(|s| s.in_flight.contains_key(id) || s.unsynced.contains(id))
    }

    /// Marks ids as not yet confirmed by the remote store.
    pub fn mark_unsynced(&self, ids: impl IntoIterator<Item = DraftId>) {
        self.update(|s| s.unsynced.extend(ids));
    }

    /// Clears the unsynced mark of `id` once the remote store is known to
    /// hold its latest save. No-op while a write for `id` is queued.
    pub(crate) fn settle(&self, id: &DraftId) {
        self.update(|s| {
            if !s.in_flight.contains_key(id) {
                s.unsynced.remove(id);
            }
        });
    }

    fn queued(&self, job: &WriteJob) {
        self.update(|s| {
            for id in job.ids() {
                *s.in_flight.entry(id.clone()).or_default() += 1;
                match job {
                    WriteJob::Save { .. } => s.unsynced.insert(id),
                    _ => s.unsynced.remove(&id),
                };
            }
        });
    }

    fn completed(&self, job: &WriteJob, succeeded: bool) {
        self.update(|s| {
            for id in job.ids() {
                if let Some(count) = s.in_flight.get_mut(&id) {
                    *count -= 1;
                    if *count == 0 {
                        s.in_flight.remove(&id);
                    }
                }
                if let WriteJob::Save { .. } = job {
                    if succeeded {
                        s.unsynced.remove(&id);
                    } else {
                        s.unsynced.insert(id);
                    }
                }
            }
        });
    }
}

/// Queue of remote draft writes drained by one background task.
#[derive(Clone)]
pub struct RemoteWriter {
    sender: mpsc::UnboundedSender<Envelope>,
    tracker: Arc<SyncTracker>,
}

impl RemoteWriter {
    /// Spawns the background task on the current Tokio runtime.
    ///
    /// The task exits once every `RemoteWriter` clone has been dropped and
    /// the queue is drained.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(
        remote: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        notifier: Arc<dyn WriteFailureNotifier>,
        tracker: Arc<SyncTracker>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = Worker {
            remote,
            collection: collection.into(),
            notifier,
            tracker: Arc::clone(&tracker),
        };
        tokio::spawn(worker.run(receiver));
        Self { sender, tracker }
    }

    pub fn tracker(&self) -> &Arc<SyncTracker> {
        &self.tracker
    }

    /// Queues `job`. The returned confirmation resolves once the job has
    /// been applied (or has failed).
    pub(crate) fn submit(&self, job: WriteJob) -> RemoteConfirmation {
        let (reply, receiver) = oneshot::channel();
        self.tracker.queued(&job);
        if let Err(mpsc::error::SendError(envelope)) = self.sender.send(Envelope { job, reply }) {
            tracing::error!("Remote writer stopped; dropping {:?}", envelope.job);
            self.tracker.completed(&envelope.job, false);
            // Dropping the envelope's reply resolves the confirmation with
            // `WriterStopped`.
        }
        RemoteConfirmation { receiver }
    }

    /// Waits until every write queued before this call has completed.
    pub async fn flush(&self) -> Result<(), DraftError> {
        self.submit(WriteJob::Flush).wait().await.map(|_| ())
    }
}

struct Worker {
    remote: Arc<dyn DocumentStore>,
    collection: String,
    notifier: Arc<dyn WriteFailureNotifier>,
    tracker: Arc<SyncTracker>,
}

impl Worker {
    async fn run(self, mut receiver: mpsc::UnboundedReceiver<Envelope>) {
        while let Some(Envelope { job, reply }) = receiver.recv().await {
            let result = self.apply(&job).await;
            self.tracker.completed(&job, result.is_ok());
            if let Err(e) = &result {
                self.report(&job, e);
            }
            // The caller may have dropped its confirmation.
            let _ = reply.send(result);
        }
        tracing::debug!(collection = %self.collection, "Remote writer stopped");
    }

    async fn apply(&self, job: &WriteJob) -> Result<WriteOutcome, DraftError> {
        match job {
            WriteJob::Save { id, body } => {
                self.remote
                    .set_one(&self.collection, id.as_str(), body.clone(), WriteMode::Merge)
                    .await?;
                tracing::debug!(draft_id = %id, "Draft written to remote store");
                Ok(WriteOutcome::Written)
            }
            WriteJob::Delete { id } => {
                self.remote.delete_one(&self.collection, id.as_str()).await?;
                tracing::debug!(draft_id = %id, "Draft deleted from remote store");
                Ok(WriteOutcome::Deleted(BatchDeleteReport {
                    deleted: vec![id.to_string()],
                    failed: Vec::new(),
                }))
            }
            WriteJob::DeleteBatch { ids } => {
                let keys: Vec<String> = ids.iter().map(DraftId::to_string).collect();
                let report = self.remote.delete_batch(&self.collection, &keys).await?;
                Ok(WriteOutcome::Deleted(report))
            }
            WriteJob::Flush => Ok(WriteOutcome::Written),
        }
    }

    fn report(&self, job: &WriteJob, error: &DraftError) {
        let operation = match job {
            WriteJob::Save { .. } => RemoteOperation::Save,
            WriteJob::Delete { .. } => RemoteOperation::Delete,
            WriteJob::DeleteBatch { .. } => RemoteOperation::BatchDelete,
            WriteJob::Flush => return,
        };
        self.notifier.notify(&RemoteWriteFailure {
            operation,
            draft_ids: job.ids(),
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CollectingFailureNotifier, InMemoryDocumentStore, InMemoryLocalCache};
    use serde_json::json;

    const JOURNAL_KEY: &str = "draftSync";

    fn id(value: &str) -> DraftId {
        DraftId::new(value).unwrap()
    }

    fn writer(
        remote: &InMemoryDocumentStore,
    ) -> (RemoteWriter, CollectingFailureNotifier) {
        let notifier = CollectingFailureNotifier::new();
        let writer = RemoteWriter::spawn(
            Arc::new(remote.clone()),
            "drafts",
            Arc::new(notifier.clone()),
            Arc::new(SyncTracker::new()),
        );
        (writer, notifier)
    }

    #[tokio::test]
    async fn writes_to_same_id_apply_in_issue_order() {
        let remote = InMemoryDocumentStore::new();
        let (writer, _) = writer(&remote);

        for n in 0..20 {
            writer.submit(WriteJob::Save {
                id: id("d1"),
                body: json!({"n": n}),
            });
        }
        writer.flush().await.unwrap();

        assert_eq!(remote.document("drafts", "d1").await.unwrap(), json!({"n": 19}));
        assert_eq!(remote.write_count(), 20);
    }

    #[tokio::test]
    async fn failed_save_is_notified_and_left_unsynced() {
        let remote = InMemoryDocumentStore::new();
        remote.fail_writes(true);
        let (writer, notifier) = writer(&remote);

        let confirmation = writer.submit(WriteJob::Save {
            id: id("d1"),
            body: json!({}),
        });
        assert!(writer.tracker().is_in_flight(&id("d1")));

        let err = confirmation.wait().await.unwrap_err();
        assert!(matches!(err, DraftError::StoreUnavailable(_)));

        let failures = notifier.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].operation, RemoteOperation::Save);
        assert_eq!(failures[0].draft_ids, vec![id("d1")]);

        assert!(!writer.tracker().is_in_flight(&id("d1")));
        assert!(writer.tracker().is_unsynced(&id("d1")));
    }

    #[tokio::test]
    async fn confirmed_save_clears_unsynced() {
        let remote = InMemoryDocumentStore::new();
        let (writer, notifier) = writer(&remote);

        writer
            .submit(WriteJob::Save {
                id: id("d1"),
                body: json!({}),
            })
            .wait()
            .await
            .unwrap();

        assert!(!writer.tracker().is_ahead(&id("d1")));
        assert!(notifier.failures().is_empty());
    }

    #[tokio::test]
    async fn batch_delete_returns_report() {
        let remote = InMemoryDocumentStore::new();
        remote.insert("drafts", "a", json!({})).await;
        remote.insert("drafts", "b", json!({})).await;
        remote.fail_delete_of("b").await;
        let (writer, _) = writer(&remote);

        let outcome = writer
            .submit(WriteJob::DeleteBatch {
                ids: vec![id("a"), id("b")],
            })
            .wait()
            .await
            .unwrap();

        let WriteOutcome::Deleted(report) = outcome else {
            panic!("expected a delete report");
        };
        assert_eq!(report.deleted, vec!["a"]);
        assert_eq!(report.failed[0].0, "b");
    }

    #[tokio::test]
    async fn dropped_confirmation_does_not_cancel_write() {
        let remote = InMemoryDocumentStore::new();
        let (writer, _) = writer(&remote);

        drop(writer.submit(WriteJob::Save {
            id: id("d1"),
            body: json!({"kept": true}),
        }));
        writer.flush().await.unwrap();

        assert!(remote.document("drafts", "d1").await.is_some());
    }

    #[tokio::test]
    async fn journal_follows_confirmation() {
        let remote = InMemoryDocumentStore::new();
        let cache = InMemoryLocalCache::new();
        let tracker = Arc::new(SyncTracker::journaled(Arc::new(cache.clone()), JOURNAL_KEY));
        let writer = RemoteWriter::spawn(
            Arc::new(remote.clone()),
            "drafts",
            Arc::new(CollectingFailureNotifier::new()),
            tracker,
        );

        writer
            .submit(WriteJob::Save {
                id: id("d1"),
                body: json!({}),
            })
            .wait()
            .await
            .unwrap();

        assert_eq!(cache.get(JOURNAL_KEY).unwrap().as_deref(), Some("[]"));
        let restored = SyncTracker::journaled(Arc::new(cache), JOURNAL_KEY);
        assert!(!restored.is_ahead(&id("d1")));
    }

    #[tokio::test]
    async fn journal_keeps_failed_saves_across_restart() {
        let remote = InMemoryDocumentStore::new();
        remote.fail_writes(true);
        let cache = InMemoryLocalCache::new();
        let tracker = Arc::new(SyncTracker::journaled(Arc::new(cache.clone()), JOURNAL_KEY));
        let writer = RemoteWriter::spawn(
            Arc::new(remote),
            "drafts",
            Arc::new(CollectingFailureNotifier::new()),
            tracker,
        );

        let _ = writer
            .submit(WriteJob::Save {
                id: id("d1"),
                body: json!({}),
            })
            .wait()
            .await;

        let restored = SyncTracker::journaled(Arc::new(cache), JOURNAL_KEY);
        assert!(restored.is_unsynced(&id("d1")));

        restored.settle(&id("d1"));
        assert!(!restored.is_ahead(&id("d1")));
    }

    #[test]
    fn settle_waits_for_queued_writes() {
        let tracker = SyncTracker::new();
        let job = WriteJob::Save {
            id: id("d1"),
            body: json!({}),
        };
        tracker.queued(&job);

        tracker.settle(&id("d1"));
        assert!(tracker.is_unsynced(&id("d1")));

        tracker.completed(&job, true);
        assert!(!tracker.is_ahead(&id("d1")));
    }
}
