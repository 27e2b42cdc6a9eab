//! Remote transaction service integration
//!
//! This module provides the client and types for talking to the remote
//! transaction service, the system of record for delivery transactions once
//! they are accepted. Failures are classified into a small taxonomy and each
//! one is surfaced as a user-visible notification at the point of failure.

/// HTTP client for the transaction resource
mod client;
/// User-facing failure notification hook
mod notify;
/// Type definitions and error taxonomy
mod types;

pub use client::{DEFAULT_REQUEST_TIMEOUT, TransactionApiClient};
pub use notify::{FailureNotifier, TracingNotifier};
pub use types::*;

use crate::transaction::TransactionRecord;

/// Narrow seam the sync path depends on.
///
/// The submission coordinator and the reconciliation sweeper only ever create
/// transactions remotely; they take this trait rather than the full HTTP
/// client so replay behavior can be exercised against fakes.
#[async_trait::async_trait]
pub trait TransactionApi: Send + Sync {
    /// Attempt to persist one record on the remote system of record
    async fn create_transaction(
        &self,
        record: &TransactionRecord,
    ) -> Result<CreatedTransaction, ApiError>;
}

#[async_trait::async_trait]
impl TransactionApi for TransactionApiClient {
    async fn create_transaction(
        &self,
        record: &TransactionRecord,
    ) -> Result<CreatedTransaction, ApiError> {
        TransactionApiClient::create_transaction(self, record).await
    }
}
