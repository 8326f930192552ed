//! Logging Failure Notifier
//!
//! Reports failed background writes through `tracing`. Hosts with a UI wrap
//! or replace it to raise a user-visible alert.

use crate::ports::{RemoteWriteFailure, WriteFailureNotifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFailureNotifier;

impl LoggingFailureNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl WriteFailureNotifier for LoggingFailureNotifier {
    fn notify(&self, failure: &RemoteWriteFailure) {
        let ids: Vec<&str> = failure.draft_ids.iter().map(|id| id.as_str()).collect();
        tracing::warn!(
            operation = ?failure.operation,
            draft_ids = ?ids,
            "Remote write failed: {}",
            failure.message
        );
    }
}
