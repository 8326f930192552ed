//! Collecting Failure Notifier
//!
//! Records every failure it receives. Used by tests and by hosts that poll
//! for failures instead of reacting to them.

use std::sync::{Arc, Mutex};

use crate::ports::{RemoteWriteFailure, WriteFailureNotifier};

#[derive(Debug, Clone, Default)]
pub struct CollectingFailureNotifier {
    failures: Arc<Mutex<Vec<RemoteWriteFailure>>>,
}

impl CollectingFailureNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the failures received so far.
    pub fn failures(&self) -> Vec<RemoteWriteFailure> {
        self.failures
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// Removes and returns the failures received so far.
    pub fn drain(&self) -> Vec<RemoteWriteFailure> {
        self.failures
            .lock()
            .map(|mut f| std::mem::take(&mut *f))
            .unwrap_or_default()
    }
}

impl WriteFailureNotifier for CollectingFailureNotifier {
    fn notify(&self, failure: &RemoteWriteFailure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DraftId;
    use crate::ports::RemoteOperation;

    fn failure(op: RemoteOperation) -> RemoteWriteFailure {
        RemoteWriteFailure {
            operation: op,
            draft_ids: vec![DraftId::new("d1").unwrap()],
            message: "offline".to_string(),
        }
    }

    #[test]
    fn records_in_order_and_drains() {
        let notifier = CollectingFailureNotifier::new();
        notifier.notify(&failure(RemoteOperation::Save));
        notifier.notify(&failure(RemoteOperation::Delete));

        let seen: Vec<_> = notifier.failures().iter().map(|f| f.operation).collect();
        assert_eq!(seen, vec![RemoteOperation::Save, RemoteOperation::Delete]);

        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.failures().is_empty());
    }
}
