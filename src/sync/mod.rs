//! Offline-first synchronization core
//!
//! This module ties the remote transaction client and the durable local queue
//! together. It exposes the two entry points the UI layer calls:
//!
//! - `SubmissionCoordinator::submit`: try the remote service, fall back to the
//!   local queue on any failure.
//! - `ReconciliationSweeper::sweep`: replay the queue against the remote
//!   service and shrink it to the still-failing residue.
//!
//! When sweeps run (on launch, on a connectivity change, on a manual action)
//! is the caller's decision; nothing here schedules them.

/// Two-tier submission path for new records
mod coordinator;
/// Queue replay and dead-letter routing
mod sweeper;
/// Outcome and error types shared by both entry points
mod types;

pub use coordinator::SubmissionCoordinator;
pub use sweeper::{DEFAULT_RETRY_BUDGET, ReconciliationSweeper};
pub use types::{SubmitOutcome, SweepReport, SyncError};


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::{ScriptedApi, sample_record};
    use super::*;
    use crate::queue::{DurableQueue, MemoryQueueStore};

    /// The full offline-then-recover flow: submit while unreachable, confirm
    /// the record waits in the queue, bring the service up and sweep.
    #[tokio::test]
    async fn offline_submission_syncs_on_the_next_sweep() {
        let api = Arc::new(ScriptedApi::offline());
        let queue = Arc::new(DurableQueue::new(Box::new(MemoryQueueStore::new())));
        let coordinator = SubmissionCoordinator::new(api.clone(), queue.clone());
        let sweeper = ReconciliationSweeper::new(api.clone(), queue.clone(), DEFAULT_RETRY_BUDGET);

        let outcome = coordinator.submit(sample_record("TXN000001")).await.unwrap();
        assert_eq!(outcome.status(), "queued-locally");

        let pending = queue.read_all().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].record.transaction_id, "TXN000001");
        assert_eq!(pending[0].record.customer_name, "Ram Traders");

        // Remote service comes back.
        api.set_online(true);
        let report = sweeper.sweep().await.unwrap();

        assert_eq!(report.synced_count, 1);
        assert_eq!(report.remaining_count, 0);
        assert!(queue.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn online_submission_leaves_nothing_for_the_sweeper() {
        let api = Arc::new(ScriptedApi::online());
        let queue = Arc::new(DurableQueue::new(Box::new(MemoryQueueStore::new())));
        let coordinator = SubmissionCoordinator::new(api.clone(), queue.clone());
        let sweeper = ReconciliationSweeper::new(api, queue, DEFAULT_RETRY_BUDGET);

        let outcome = coordinator.submit(sample_record("TXN000001")).await.unwrap();
        match outcome {
            SubmitOutcome::Remote(created) => {
                assert_eq!(created.transaction_id, "TXN000001");
            }
            other => panic!("Expected remote outcome, got {:?}", other),
        }

        let report = sweeper.sweep().await.unwrap();
        assert_eq!(report, SweepReport::default());
    }
}
