//! Reconciliation sweeper: replay the local queue against the remote service.
//!
//! One sweep attempts every pending record concurrently, waits for all of them
//! to settle, then shrinks the queue to the still-failing residue in original
//! order. Records that keep failing are not retried forever: once a record's
//! attempt count reaches the retry budget it moves to the dead-letter store
//! for operator inspection. Storage faults during the final write propagate to
//! the caller instead of being logged and swallowed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::types::{SweepReport, SyncError};
use crate::api::TransactionApi;
use crate::queue::DurableQueue;

/// Default number of failed attempts before a record is dead-lettered
pub const DEFAULT_RETRY_BUDGET: u32 = 5;

/// Replays the durable local queue against the remote transaction service
pub struct ReconciliationSweeper {
    api: Arc<dyn TransactionApi>,
    queue: Arc<DurableQueue>,
    retry_budget: u32,
}

impl ReconciliationSweeper {
    pub fn new(api: Arc<dyn TransactionApi>, queue: Arc<DurableQueue>, retry_budget: u32) -> Self {
        Self {
            api,
            queue,
            retry_budget,
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Every pending record is attempted independently; no attempt is
    /// cancelled because a sibling failed, and all remote failure kinds mean
    /// the same thing here: not yet synced, retry on a later sweep. An empty
    /// queue is a no-op.
    pub async fn sweep(&self) -> Result<SweepReport, SyncError> {
        let pending = self.queue.read_all().await?;
        if pending.is_empty() {
            debug!("No pending transactions, nothing to sweep");
            return Ok(SweepReport::default());
        }

        info!("Replaying {} pending transactions", pending.len());

        let outcomes = join_all(
            pending
                .iter()
                .map(|entry| self.api.create_transaction(&entry.record)),
        )
        .await;

        let mut synced = HashSet::new();
        let mut failed = HashMap::new();
        for (entry, outcome) in pending.iter().zip(outcomes) {
            let id = entry.record.transaction_id.clone();
            match outcome {
                Ok(_) => {
                    debug!("Transaction {} synced", id);
                    synced.insert(id);
                }
                Err(error) => {
                    warn!("Replay of {} failed: {}", id, error);
                    let mut updated = entry.clone();
                    updated.note_failure(error.to_string());
                    failed.insert(id, updated);
                }
            }
        }

        let outcome = self
            .queue
            .reconcile(&synced, failed, self.retry_budget)
            .await?;

        let report = SweepReport {
            synced_count: outcome.synced,
            remaining_count: outcome.remaining,
            dead_lettered_count: outcome.dead_lettered,
        };
        info!("Sweep completed: {}", report.summary());
        Ok(report)
    }
}
