//! Credential storage for outbound requests.
//!
//! The transaction client is handed a `CredentialProvider` at construction and
//! asks it for the current bearer token before every call. Absence of a token
//! is not an error; requests simply go out unauthenticated. Token refresh is
//! out of scope.

use std::path::PathBuf;

use tracing::debug;

/// Source of the bearer token attached to outbound requests
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current bearer token, or `None` to send the request unauthenticated
    async fn bearer_token(&self) -> Option<String>;
}

/// Credential store backed by a token file in the data directory.
///
/// Reads the token fresh on every call so an externally rotated token is
/// picked up without restarting. A missing or empty file yields `None`.
pub struct FileCredentialStore {
    token_path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store reading `auth_token` inside the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            token_path: data_dir.join("auth_token"),
        }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for FileCredentialStore {
    async fn bearer_token(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.token_path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                debug!("No credential token available: {}", e);
                None
            }
        }
    }
}

/// Fixed credentials, mainly for wiring tests and embedded use
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    /// Always present the given bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Never present a token
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticCredentials {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}
