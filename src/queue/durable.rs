//! Durable pending-transaction queue.
//!
//! The queue is the sole source of truth for "not yet synced" records. All
//! mutations run behind one async mutex, so a submission's `append` can never
//! interleave with a sweep's read-modify-write and lose an update. The sweeper
//! finishes through `reconcile`, which merges its results against the current
//! stored list instead of overwriting it, so records appended while remote
//! attempts were in flight survive.

use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::store::{QueueStore, QueuedRecord, StorageError};

/// Storage key for the pending queue
pub const PENDING_QUEUE_KEY: &str = "pending_transactions";
/// Storage key for records removed from active retry
pub const DEAD_LETTER_KEY: &str = "dead_letter_transactions";

/// Result of a reconciliation write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Records confirmed on the remote service and dropped from the queue.
    pub synced: usize,
    /// Records still pending after the write.
    pub remaining: usize,
    /// Records moved to the dead-letter store this pass.
    pub dead_lettered: usize,
}

/// Persistent, insertion-ordered queue of records awaiting sync
pub struct DurableQueue {
    store: Box<dyn QueueStore>,
    // Single-writer discipline over every read-modify-write below.
    lock: Mutex<()>,
}

impl DurableQueue {
    pub fn new(store: Box<dyn QueueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Append one record to the pending queue.
    ///
    /// Appending an id that is already queued is a no-op, keeping the
    /// per-queue uniqueness invariant and the "exactly once" fallback
    /// guarantee.
    pub async fn append(&self, entry: QueuedRecord) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut records = self.store.load(PENDING_QUEUE_KEY).await?;
        if records
            .iter()
            .any(|existing| existing.record.transaction_id == entry.record.transaction_id)
        {
            warn!(
                "Transaction {} is already queued, skipping duplicate append",
                entry.record.transaction_id
            );
            return Ok(());
        }

        info!(
            "Queued transaction {} locally for later sync",
            entry.record.transaction_id
        );
        records.push(entry);
        self.store.save(PENDING_QUEUE_KEY, &records).await
    }

    /// Read the pending queue in insertion order
    pub async fn read_all(&self) -> Result<Vec<QueuedRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        self.store.load(PENDING_QUEUE_KEY).await
    }

    /// Overwrite the pending queue wholesale
    pub async fn replace_all(&self, records: Vec<QueuedRecord>) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.store.save(PENDING_QUEUE_KEY, &records).await
    }

    /// Read the dead-letter store, for operator inspection
    pub async fn read_dead_letters(&self) -> Result<Vec<QueuedRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        self.store.load(DEAD_LETTER_KEY).await
    }

    /// Fold sweep results back into the queue under a single lock.
    ///
    /// Walks the currently stored list in order: synced ids are dropped,
    /// attempted-and-failed entries are replaced with their updated
    /// bookkeeping (or diverted to the dead-letter store once `attempts`
    /// reaches `retry_budget`), and entries the sweep never saw, because they
    /// were appended while it was running, are kept untouched.
    pub async fn reconcile(
        &self,
        synced: &HashSet<String>,
        mut failed: HashMap<String, QueuedRecord>,
        retry_budget: u32,
    ) -> Result<ReconcileOutcome, StorageError> {
        let _guard = self.lock.lock().await;

        let current = self.store.load(PENDING_QUEUE_KEY).await?;
        let mut residual = Vec::new();
        let mut dead = Vec::new();
        let mut synced_count = 0;

        for entry in current {
            let id = &entry.record.transaction_id;
            if synced.contains(id) {
                synced_count += 1;
                continue;
            }
            match failed.remove(id) {
                Some(updated) if updated.attempts >= retry_budget => {
                    warn!(
                        "Transaction {} failed {} attempts, moving to dead-letter store",
                        id, updated.attempts
                    );
                    dead.push(updated);
                }
                Some(updated) => residual.push(updated),
                // Appended after the sweep read the queue; keep as-is.
                None => residual.push(entry),
            }
        }

        let outcome = ReconcileOutcome {
            synced: synced_count,
            remaining: residual.len(),
            dead_lettered: dead.len(),
        };

        if !dead.is_empty() {
            let mut dead_letters = self.store.load(DEAD_LETTER_KEY).await?;
            // An interrupted reconcile can leave a record in both stores; the
            // same uniqueness guard as append keeps the re-divert from
            // duplicating it here.
            for entry in dead {
                if dead_letters
                    .iter()
                    .any(|existing| existing.record.transaction_id == entry.record.transaction_id)
                {
                    warn!(
                        "Transaction {} is already dead-lettered, skipping duplicate",
                        entry.record.transaction_id
                    );
                    continue;
                }
                dead_letters.push(entry);
            }
            self.store.save(DEAD_LETTER_KEY, &dead_letters).await?;
        }

        self.store.save(PENDING_QUEUE_KEY, &residual).await?;
        debug!(
            "Reconciled queue: {} synced, {} remaining, {} dead-lettered",
            outcome.synced, outcome.remaining, outcome.dead_lettered
        );
        Ok(outcome)
    }
}
