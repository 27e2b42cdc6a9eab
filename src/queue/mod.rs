//! Durable local queue for pending transactions
//!
//! This module persists records that could not reach the remote service across
//! process restarts. The stored state is one JSON-encoded list per fixed key,
//! read and written wholesale. `DurableQueue` serializes every mutation behind
//! a single lock; `store` provides the pluggable persistence backends.

/// Queue facade with single-writer mutation discipline
mod durable;
/// Persistence backends and the queued-record type
mod store;

pub use durable::{DEAD_LETTER_KEY, DurableQueue, PENDING_QUEUE_KEY, ReconcileOutcome};
pub use store::{FileQueueStore, MemoryQueueStore, QueueStore, QueuedRecord, StorageError};
