//!
//! HTTP client for the remote transaction service.
//!
//! This module provides an async client for the transaction resource of the
//! remote system of record. Every outbound call attaches the stored credential
//! as a bearer token when one exists, classifies failures into the `ApiError`
//! taxonomy, and surfaces each failure once through the configured
//! `FailureNotifier`. All methods are async and designed for use with Tokio.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};

use super::notify::FailureNotifier;
use super::types::{ApiError, CreatedTransaction, GENERIC_SERVER_MESSAGE, TransactionPage};
use crate::credentials::CredentialProvider;
use crate::transaction::TransactionRecord;

/// Upper bound on any single request round-trip
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote transaction service client
#[derive(Clone)]
pub struct TransactionApiClient {
    /// The underlying HTTP client.
    http_client: Client,
    /// Base URL of the transaction service API.
    base_url: String,
    /// Source of the bearer token attached to every request.
    credentials: Arc<dyn CredentialProvider>,
    /// Sink for user-visible failure notifications.
    notifier: Arc<dyn FailureNotifier>,
}

impl TransactionApiClient {
    /// Create a new client for the given API base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the transaction service, e.g. `https://host/api/v1`.
    /// * `timeout` - Upper bound on each request; elapsed timeouts classify as `Network`.
    /// * `credentials` - Provider of the optional bearer token.
    /// * `notifier` - Receives one notification per classified failure.
    pub fn new(
        base_url: String,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
        notifier: Arc<dyn FailureNotifier>,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
            credentials,
            notifier,
        }
    }

    /// Submit a new transaction record.
    ///
    /// # Returns
    /// The server-assigned representation on 2xx, or a classified `ApiError`.
    pub async fn create_transaction(
        &self,
        record: &TransactionRecord,
    ) -> Result<CreatedTransaction, ApiError> {
        debug!("Submitting transaction {}", record.transaction_id);

        let request = self
            .http_client
            .post(self.endpoint("/transactions"))
            .json(record);

        let response = self.execute(request).await?;
        let created: CreatedTransaction = self.decode(response).await?;

        info!(
            "Transaction {} accepted by remote service",
            created.transaction_id
        );
        Ok(created)
    }

    /// Fetch one page of transactions.
    pub async fn list_transactions(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<TransactionPage, ApiError> {
        let request = self
            .http_client
            .get(self.endpoint("/transactions"))
            .query(&[("page", page), ("limit", limit)]);

        let response = self.execute(request).await?;
        self.decode(response).await
    }

    /// Fetch a single transaction by its client-generated id.
    pub async fn get_transaction(&self, id: &str) -> Result<TransactionRecord, ApiError> {
        let request = self
            .http_client
            .get(self.endpoint(&format!("/transactions/{}", id)));

        let response = self.execute(request).await?;
        self.decode(response).await
    }

    /// Replace a stored transaction with an updated record.
    pub async fn update_transaction(
        &self,
        id: &str,
        record: &TransactionRecord,
    ) -> Result<TransactionRecord, ApiError> {
        let request = self
            .http_client
            .put(self.endpoint(&format!("/transactions/{}", id)))
            .json(record);

        let response = self.execute(request).await?;
        self.decode(response).await
    }

    /// Delete a transaction from the remote service.
    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let request = self
            .http_client
            .delete(self.endpoint(&format!("/transactions/{}", id)));

        self.execute(request).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attach credentials, send the request and classify the outcome.
    ///
    /// Non-2xx responses become `Server` errors with the message taken from the
    /// response body when present. Transport failures without a response become
    /// `Network`; anything else becomes `Request`.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.credentials.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.report(classify_transport(e))),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());

        Err(self.report(ApiError::Server {
            status: status.as_u16(),
            message,
        }))
    }

    /// Decode a 2xx response body, classifying decode faults as `Request`.
    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            self.report(ApiError::Request(format!(
                "Failed to decode response body: {}",
                e
            )))
        })
    }

    /// Notify and hand the error back to the caller
    fn report(&self, error: ApiError) -> ApiError {
        self.notifier.notify_failure(&error);
        error
    }
}

fn classify_transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() || error.is_connect() {
        ApiError::Network
    } else {
        ApiError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::notify::TracingNotifier;
    use crate::credentials::StaticCredentials;
    use crate::transaction::{PaymentStatus, TransactionRecordBuilder};
    use mockito::Matcher;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier(AtomicUsize);

    impl FailureNotifier for CountingNotifier {
        fn notify_failure(&self, _error: &ApiError) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sample_record() -> TransactionRecord {
        TransactionRecordBuilder::new()
            .with_transaction_id("TXN000001")
            .with_vehicle_no("BA-1-2345")
            .with_customer_name("Ram Traders")
            .with_shipping_address("Kathmandu")
            .with_material("Sand")
            .with_quantity(10.0)
            .with_total_amount(15000.0)
            .with_payment_status(PaymentStatus::Unpaid)
            .with_driver_name("Hari")
            .build()
            .unwrap()
    }

    fn client_for(url: &str, credentials: StaticCredentials) -> TransactionApiClient {
        TransactionApiClient::new(
            url.to_string(),
            DEFAULT_REQUEST_TIMEOUT,
            Arc::new(credentials),
            Arc::new(TracingNotifier),
        )
    }

    #[tokio::test]
    async fn create_attaches_bearer_token_and_decodes_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/transactions")
            .match_header("authorization", "Bearer depot-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "transactionId": "TXN000001",
                "customerName": "Ram Traders",
            })))
            .with_status(201)
            .with_body(r#"{"id": "srv-9", "transactionId": "TXN000001"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), StaticCredentials::bearer("depot-token"));
        let created = client
            .create_transaction(&sample_record())
            .await
            .expect("Failed to create transaction");

        assert_eq!(created.id.as_deref(), Some("srv-9"));
        assert_eq!(created.transaction_id, "TXN000001");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_token_sends_request_unauthenticated() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/transactions")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"transactionId": "TXN000001"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), StaticCredentials::anonymous());
        client
            .create_transaction(&sample_record())
            .await
            .expect("Anonymous request should succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_classifies_as_server_error_with_body_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/transactions")
            .with_status(422)
            .with_body(r#"{"message": "quantity is required"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), StaticCredentials::anonymous());
        let error = client.create_transaction(&sample_record()).await.unwrap_err();

        match error {
            ApiError::Server { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "quantity is required");
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_2xx_without_body_uses_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/transactions/TXN000001")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server.url(), StaticCredentials::anonymous());
        let error = client.delete_transaction("TXN000001").await.unwrap_err();

        match error {
            ApiError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, GENERIC_SERVER_MESSAGE);
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_host_classifies_as_network_error() {
        // Port 9 (discard) has no listener in the test environment.
        let client = client_for("http://127.0.0.1:9", StaticCredentials::anonymous());
        let error = client.create_transaction(&sample_record()).await.unwrap_err();
        assert!(matches!(error, ApiError::Network));
    }

    #[tokio::test]
    async fn every_failure_notifies_exactly_once() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/transactions")
            .with_status(503)
            .create_async()
            .await;

        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        let client = TransactionApiClient::new(
            server.url(),
            DEFAULT_REQUEST_TIMEOUT,
            Arc::new(StaticCredentials::anonymous()),
            notifier.clone(),
        );

        let _ = client.create_transaction(&sample_record()).await;
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_does_not_notify() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/transactions/TXN000001")
            .with_status(200)
            .with_body(serde_json::to_string(&sample_record()).unwrap())
            .create_async()
            .await;

        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        let client = TransactionApiClient::new(
            server.url(),
            DEFAULT_REQUEST_TIMEOUT,
            Arc::new(StaticCredentials::anonymous()),
            notifier.clone(),
        );

        let record = client.get_transaction("TXN000001").await.unwrap();
        assert_eq!(record.transaction_id, "TXN000001");
        assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn list_sends_page_and_limit_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/transactions")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"transactions": [], "page": 2, "limit": 20, "total": 41}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), StaticCredentials::anonymous());
        let page = client.list_transactions(2, 20).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 41);
        assert!(page.transactions.is_empty());
        mock.assert_async().await;
    }
}
