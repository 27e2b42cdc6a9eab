//! Shared types for the submission and reconciliation paths

use serde::Serialize;

use crate::api::{ApiError, CreatedTransaction};
use crate::queue::StorageError;

/// Errors surfaced by the sync entry points
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Remote transaction service error: {0}")]
    Api(#[from] ApiError),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    /// Both tiers failed: the record reached neither the remote service nor
    /// the local queue and is lost to this submission.
    #[error("Submission lost: remote attempt failed ({remote}) and local enqueue failed ({storage})")]
    SubmissionLost {
        remote: ApiError,
        storage: StorageError,
    },
}

/// Where a submitted record ended up
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Accepted by the remote system of record.
    Remote(CreatedTransaction),
    /// Stored in the durable local queue, to be synced by a later sweep.
    QueuedLocally,
}

impl SubmitOutcome {
    /// Stable status string for the UI layer
    pub fn status(&self) -> &'static str {
        match self {
            SubmitOutcome::Remote(_) => "remote",
            SubmitOutcome::QueuedLocally => "queued-locally",
        }
    }
}

/// Summary of one reconciliation pass over the local queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Records confirmed remotely and removed from the queue.
    pub synced_count: usize,
    /// Records still pending after the sweep.
    pub remaining_count: usize,
    /// Records moved to the dead-letter store this pass.
    pub dead_lettered_count: usize,
}

impl SweepReport {
    /// Get a human-readable summary of the sweep
    pub fn summary(&self) -> String {
        format!(
            "{} synced, {} remaining{}",
            self.synced_count,
            self.remaining_count,
            if self.dead_lettered_count == 0 {
                String::new()
            } else {
                format!(", {} dead-lettered", self.dead_lettered_count)
            }
        )
    }
}
