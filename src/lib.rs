//! Offline-first sync core for delivery transactions.
//!
//! A depot records a delivery transaction; the submission coordinator tries to
//! persist it on the remote transaction service and, if that fails, stores it
//! in a durable local queue. The reconciliation sweeper later replays the
//! queue against the service and shrinks it to the records that still fail,
//! routing repeat offenders to a dead-letter store.
//!
//! The UI layer is an external collaborator: it hands a validated
//! `TransactionRecord` to [`sync::SubmissionCoordinator::submit`] and triggers
//! [`sync::ReconciliationSweeper::sweep`] on launch, on connectivity changes
//! or on demand.

/// Remote transaction service client and error taxonomy
pub mod api;
/// Service configuration
pub mod config;
/// Credential storage for outbound requests
pub mod credentials;
/// Durable local queue and its persistence backends
pub mod queue;
/// Submission coordinator and reconciliation sweeper
pub mod sync;
/// Delivery transaction domain model
pub mod transaction;
