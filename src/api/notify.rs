//! User-facing failure notifications.
//!
//! Every remote-call failure surfaces exactly one notification, emitted by the
//! transaction client at the point of classification. Callers further up the
//! stack (coordinator, sweeper) never duplicate it. The UI layer can plug in
//! its own `FailureNotifier`; the default logs through `tracing`.

use tracing::warn;

use super::types::ApiError;

/// Sink for user-visible failure notifications
pub trait FailureNotifier: Send + Sync {
    /// Report a classified remote-call failure
    fn notify_failure(&self, error: &ApiError);
}

/// Notifier that writes failures to the tracing log
pub struct TracingNotifier;

impl FailureNotifier for TracingNotifier {
    fn notify_failure(&self, error: &ApiError) {
        match error {
            ApiError::Server { status, message } => {
                warn!(kind = "server", "Server Error ({}): {}", status, message);
            }
            ApiError::Network => {
                warn!(
                    kind = "network",
                    "Network Error: please check your internet connection"
                );
            }
            ApiError::Request(message) => {
                warn!(kind = "request", "Request Error: {}", message);
            }
        }
    }
}
