//! Delivery transaction domain model
//!
//! This module defines the `TransactionRecord` that flows through the whole sync
//! path: the submission coordinator sends it to the remote service, the durable
//! queue persists it on failure, and the reconciliation sweeper replays it.
//! Records are immutable once created; partial construction goes through the
//! builder in `transaction::builder`.

/// Builder for constructing validated transaction records
pub mod builder;

pub use builder::{RecordError, TransactionRecordBuilder};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Payment state of a delivery transaction as entered at the depot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// Full amount received
    Paid,
    /// No payment received yet
    #[default]
    Unpaid,
    /// Some payment received, remainder outstanding
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
}

/// A single delivery transaction as recorded at the depot.
///
/// Field names serialize in camelCase to match the wire format expected by the
/// remote transaction service; `date` serializes as an ISO-8601 timestamp.
/// A record is never mutated after creation: it either exists remotely or sits
/// in the pending queue until a sweep confirms it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Client-generated identifier, unique and immutable once created.
    pub transaction_id: String,
    /// When the delivery was recorded.
    pub date: DateTime<Utc>,
    /// Registration number of the delivering vehicle.
    pub vehicle_no: String,
    pub customer_name: String,
    pub shipping_address: String,
    /// Material delivered (sand, bricks, gravel, ...).
    pub material: String,
    pub quantity: f64,
    pub payment_status: PaymentStatus,
    /// Amount received so far, defaults to 0 when absent on the wire.
    #[serde(default)]
    pub payment_received: f64,
    pub total_amount: f64,
    pub driver_name: String,
    /// Optional free-text remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Generate a fresh client-side transaction id.
///
/// Format is "TXN" followed by the last six digits of the current millisecond
/// timestamp and a four-digit random suffix. The random suffix guards against
/// two records created within the same millisecond.
pub fn generate_transaction_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::rng().random_range(0..10_000);
    format!("TXN{:06}{:04}", millis.rem_euclid(1_000_000), suffix)
}
