//! Types and error taxonomy for the remote transaction service

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionRecord;

/// Fallback message when a non-2xx response carries no usable body
pub const GENERIC_SERVER_MESSAGE: &str = "Unknown error occurred";

/// Classified outcome of a failed remote call.
///
/// Every failure of the transaction client falls into exactly one of these
/// kinds. The submission coordinator branches on failure presence only, never
/// on the kind, so the taxonomy exists for notification and diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request went out but no response came back (unreachable host,
    /// connection refused, timeout).
    #[error("Network error: no response from server")]
    Network,

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not be constructed or its response not understood.
    #[error("Request error: {0}")]
    Request(String),
}

impl ApiError {
    /// Short kind label used for notifications and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network => "network",
            ApiError::Server { .. } => "server",
            ApiError::Request(_) => "request",
        }
    }
}

/// Server-assigned representation of a created transaction.
///
/// The service echoes the submitted record back with its own identifier; only
/// the fields the sync path cares about are decoded here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTransaction {
    /// Identifier assigned by the remote system of record.
    #[serde(default)]
    pub id: Option<String>,
    /// The client-generated id the record was submitted with.
    pub transaction_id: String,
}

/// One page of transactions from the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
}
