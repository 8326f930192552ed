//! Write Failure Notifier Port - asynchronous report of failed remote writes.
//!
//! Saves are committed locally first and pushed to the remote store in the
//! background. When the remote write fails the local state is kept as is and
//! the failure is handed to this port so the UI can raise an alert.

use crate::domain::foundation::DraftId;

/// Which remote operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Save,
    Delete,
    BatchDelete,
}

/// Details of one failed remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteWriteFailure {
    pub operation: RemoteOperation,
    pub draft_ids: Vec<DraftId>,
    pub message: String,
}

/// Port receiving failed remote writes.
pub trait WriteFailureNotifier: Send + Sync {
    fn notify(&self, failure: &RemoteWriteFailure);
}
