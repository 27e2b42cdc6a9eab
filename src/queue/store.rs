//! Storage backends for the pending-transaction queue.
//!
//! A `QueueStore` persists whole record lists under fixed keys; the list is
//! always read and written wholesale, never patched in place. The file-backed
//! implementation keeps one JSON document per key in the data directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::transaction::TransactionRecord;

/// Local persistence fault
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A transaction record waiting in the local queue, with retry bookkeeping.
///
/// The record itself is stored flattened, so the persisted document stays a
/// JSON sequence of transaction fields plus `attempts` and `lastError`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueuedRecord {
    #[serde(flatten)]
    pub record: TransactionRecord,
    /// Remote attempts made so far, counting the one that enqueued it.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Message of the most recent failure.
    #[serde(default)]
    pub last_error: Option<String>,
}

fn default_attempts() -> u32 {
    1
}

impl QueuedRecord {
    /// Wrap a record after its first failed remote attempt
    pub fn first_attempt(record: TransactionRecord, error: impl Into<String>) -> Self {
        Self {
            record,
            attempts: 1,
            last_error: Some(error.into()),
        }
    }

    /// Record another failed replay attempt
    pub fn note_failure(&mut self, error: impl Into<String>) {
        self.attempts += 1;
        self.last_error = Some(error.into());
    }
}

/// Persistence for pending-record lists, keyed by logical queue name
#[async_trait::async_trait]
pub trait QueueStore: Send + Sync {
    /// Load the list stored under `key`; an absent key is an empty list
    async fn load(&self, key: &str) -> Result<Vec<QueuedRecord>, StorageError>;

    /// Overwrite the list stored under `key` wholesale
    async fn save(&self, key: &str, records: &[QueuedRecord]) -> Result<(), StorageError>;
}

/// File-based implementation of `QueueStore`
pub struct FileQueueStore {
    data_dir: PathBuf,
}

impl FileQueueStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait::async_trait]
impl QueueStore for FileQueueStore {
    async fn load(&self, key: &str) -> Result<Vec<QueuedRecord>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let records: Vec<QueuedRecord> = serde_json::from_str(&contents)?;
        Ok(records)
    }

    async fn save(&self, key: &str, records: &[QueuedRecord]) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let contents = serde_json::to_string_pretty(records)?;
        let path = self.path_for(key);
        tokio::fs::write(&path, contents).await?;

        info!("Saved {} records to {:?}", records.len(), path);
        Ok(())
    }
}

/// In-memory implementation of `QueueStore`, used in tests and embedded setups
#[derive(Default)]
pub struct MemoryQueueStore {
    entries: Mutex<HashMap<String, Vec<QueuedRecord>>>,
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl QueueStore for MemoryQueueStore {
    async fn load(&self, key: &str) -> Result<Vec<QueuedRecord>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, key: &str, records: &[QueuedRecord]) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionRecordBuilder;

    fn queued(id: &str) -> QueuedRecord {
        let record = TransactionRecordBuilder::new()
            .with_transaction_id(id)
            .with_vehicle_no("BA-1-2345")
            .with_customer_name("Ram Traders")
            .with_shipping_address("Kathmandu")
            .with_material("Sand")
            .with_quantity(10.0)
            .with_total_amount(15000.0)
            .with_driver_name("Hari")
            .build()
            .unwrap();
        QueuedRecord::first_attempt(record, "Network error: no response from server")
    }

    #[tokio::test]
    async fn absent_key_loads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileQueueStore::new(dir.path().to_path_buf());
        let records = store.load("pending_transactions").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn saved_records_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileQueueStore::new(dir.path().to_path_buf());

        let records = vec![queued("TXN000001"), queued("TXN000002")];
        store.save("pending_transactions", &records).await.unwrap();

        let loaded = store.load("pending_transactions").await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn queued_record_flattens_into_transaction_fields() {
        let value = serde_json::to_value(queued("TXN000001")).unwrap();
        assert!(value.get("transactionId").is_some());
        assert_eq!(value.get("attempts").and_then(|a| a.as_u64()), Some(1));
        assert!(value.get("lastError").is_some());
        // No nested wrapper object around the record itself.
        assert!(value.get("record").is_none());
    }

    #[tokio::test]
    async fn note_failure_tracks_attempts_and_message() {
        let mut entry = queued("TXN000001");
        entry.note_failure("Server error (500): boom");
        assert_eq!(entry.attempts, 2);
        assert_eq!(
            entry.last_error.as_deref(),
            Some("Server error (500): boom")
        );
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryQueueStore::new();
        assert!(store.load("pending_transactions").await.unwrap().is_empty());
        store
            .save("pending_transactions", &[queued("TXN000001")])
            .await
            .unwrap();
        let loaded = store.load("pending_transactions").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].record.transaction_id, "TXN000001");
    }
}
