//! Submission coordinator: one record, two destinations.
//!
//! A new record is first offered to the remote transaction service. On any
//! failure kind it falls back to the durable local queue. This is a two-tier
//! fallback rather than an inline retry loop, so the caller never blocks for
//! more than one request round-trip. Only a failure of both tiers is fatal to
//! the submission.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::types::{SubmitOutcome, SyncError};
use crate::api::TransactionApi;
use crate::queue::{DurableQueue, QueuedRecord};
use crate::transaction::TransactionRecord;

/// Orchestrates "try remote, else enqueue locally" for a single record
pub struct SubmissionCoordinator {
    api: Arc<dyn TransactionApi>,
    queue: Arc<DurableQueue>,
}

impl SubmissionCoordinator {
    pub fn new(api: Arc<dyn TransactionApi>, queue: Arc<DurableQueue>) -> Self {
        Self { api, queue }
    }

    /// Submit one record.
    ///
    /// On remote success the record is solely owned by the remote system of
    /// record. On remote failure of any kind the record is appended
    /// to the local queue with its first-attempt bookkeeping and the caller is
    /// told it was queued, which the UI treats as success ("will sync later").
    /// The remote failure itself has already been notified by the client; no
    /// second notification happens here.
    pub async fn submit(&self, record: TransactionRecord) -> Result<SubmitOutcome, SyncError> {
        let transaction_id = record.transaction_id.clone();

        match self.api.create_transaction(&record).await {
            Ok(created) => {
                info!("Transaction {} persisted remotely", transaction_id);
                Ok(SubmitOutcome::Remote(created))
            }
            Err(remote) => {
                warn!(
                    "Remote submission of {} failed ({}), falling back to local queue",
                    transaction_id,
                    remote.kind()
                );

                let entry = QueuedRecord::first_attempt(record, remote.to_string());
                match self.queue.append(entry).await {
                    Ok(()) => {
                        info!("Transaction {} stored locally, will sync later", transaction_id);
                        Ok(SubmitOutcome::QueuedLocally)
                    }
                    Err(storage) => {
                        error!(
                            "Transaction {} lost: both remote submission and local enqueue failed",
                            transaction_id
                        );
                        Err(SyncError::SubmissionLost { remote, storage })
                    }
                }
            }
        }
    }
}
