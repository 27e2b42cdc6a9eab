use std::sync::Arc;

use tracing::{error, info, warn};

use depot_sync::api::{TracingNotifier, TransactionApiClient};
use depot_sync::config::SyncServiceConfig;
use depot_sync::credentials::FileCredentialStore;
use depot_sync::queue::{DurableQueue, FileQueueStore};
use depot_sync::sync::ReconciliationSweeper;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Starting depot sync service");

    let config = SyncServiceConfig::from_env();
    info!(
        "Using API {} with data directory {:?}",
        config.api_base_url, config.data_dir
    );

    let credentials = Arc::new(FileCredentialStore::new(config.data_dir.clone()));
    let notifier = Arc::new(TracingNotifier);
    let client = Arc::new(TransactionApiClient::new(
        config.api_base_url.clone(),
        config.request_timeout,
        credentials,
        notifier,
    ));

    let queue = Arc::new(DurableQueue::new(Box::new(FileQueueStore::new(
        config.data_dir.clone(),
    ))));

    // Startup sweep: replay whatever the previous run left behind. Further
    // sweep triggers (connectivity changes, manual refresh) belong to the
    // embedding application.
    let sweeper = ReconciliationSweeper::new(client, queue.clone(), config.retry_budget);
    match sweeper.sweep().await {
        Ok(report) => {
            info!("Startup sweep finished: {}", report.summary());
        }
        Err(e) => {
            error!("Startup sweep failed: {}", e);
            return;
        }
    }

    match queue.read_dead_letters().await {
        Ok(dead) if !dead.is_empty() => {
            warn!(
                "{} transactions are dead-lettered and need operator attention",
                dead.len()
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to read dead-letter store: {}", e);
        }
    }
}
