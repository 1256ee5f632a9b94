//! Webhook Receiver Main Entry Point
//!
//! Starts the HTTP ingress that authenticates webhook calls and enqueues
//! them for the talk indexer worker.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use talk_indexer_queue::{QueueProvider, SqsQueueClient};
use webhook_receiver::server::state::AppState;
use webhook_receiver::server::{create_app, run_server};
use webhook_receiver::{ReceiverConfig, ReceiverError};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("webhook_receiver=info,talk_indexer_queue=info"));

    let json_logs = env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "webhook-receiver",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), ReceiverError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let config = ReceiverConfig::from_env()?;

    info!(
        queue_url = %config.queue_url,
        region = %config.region,
        port = config.port,
        "Webhook receiver starting"
    );

    let queue: Arc<dyn QueueProvider> = Arc::new(
        SqsQueueClient::new(&config.queue_endpoint, &config.queue_url)
            .map_err(|e| ReceiverError::config(format!("Failed to create queue client: {}", e)))?,
    );

    let state = AppState {
        queue,
        webhook_secret: config.webhook_secret.clone(),
    };

    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    run_server(app, addr).await
}
