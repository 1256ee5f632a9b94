//! Talk Indexer Main Entry Point
//!
//! This is the main binary for the talk indexer worker. It consumes webhook
//! events from the queue and indexes talks into OpenSearch, optionally
//! running a bulk reindex sweep first.

use dotenv::dotenv;
use std::env;
use talk_indexer::{Config, Dependencies, IndexingError};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("talk_indexer=info,talk_indexer_queue=info"));

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
        service_name = "talk-indexer",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting talk indexer worker");

    let config = Config::from_env()?;
    let deps = Dependencies::new(&config).await?;

    if config.reindex.on_start {
        info!("Reindex on start enabled");
        if config.reindex.conference_ids.is_empty() {
            warn!("REINDEX_ON_START=true but REINDEX_CONFERENCE_IDS is empty");
        } else {
            let summary = deps
                .reindexer
                .reindex_conferences(&config.reindex.conference_ids)
                .await;
            info!(
                talks_indexed = summary.talks_indexed,
                talk_failures = summary.talk_failures,
                conference_failures = summary.conference_failures,
                "Startup reindex finished"
            );
        }
    }

    deps.poller.run().await?;

    info!("Talk indexer stopped");
    Ok(())
}
