//! Dependency initialization and wiring for the talk indexer.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::consumer::{PollerConfig, QueuePoller};
use crate::processor::TalkProcessor;
use crate::reindex::Reindexer;
use crate::upstream::{ProgramApiClient, TalkSource};
use crate::IndexingError;
use talk_indexer_queue::{QueueProvider, SqsQueueClient};
use talk_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexProvider};

/// Container for all initialized components.
pub struct Dependencies {
    /// The queue poller ready to run.
    pub poller: QueuePoller,
    /// The bulk reindexer, for the reindex-on-start sweep.
    pub reindexer: Reindexer,
}

impl Dependencies {
    /// Initialize all components from the given configuration.
    ///
    /// Validates the search index (creating it if absent) before anything
    /// else so a worker never polls against a missing index.
    pub async fn new(config: &Config) -> Result<Self, IndexingError> {
        info!(
            queue_url = %config.queue.queue_url,
            region = %config.queue.region,
            program_api_url = %config.upstream.base_url,
            opensearch_url = %config.search.url,
            index = %config.search.index,
            "Initializing dependencies"
        );

        let search_provider = OpenSearchProvider::new(
            &config.search.url,
            config.search.credentials(),
            IndexConfig::new(&config.search.index),
        )
        .await
        .map_err(|e| IndexingError::config(format!("Failed to create search provider: {}", e)))?;

        search_provider
            .ensure_index_exists()
            .await
            .map_err(|e| IndexingError::config(format!("Failed to ensure index exists: {}", e)))?;

        let search: Arc<dyn SearchIndexProvider> = Arc::new(search_provider);

        let queue: Arc<dyn QueueProvider> = Arc::new(
            SqsQueueClient::new(&config.queue.endpoint, &config.queue.queue_url)
                .map_err(|e| IndexingError::config(format!("Failed to create queue client: {}", e)))?,
        );

        let source: Arc<dyn TalkSource> = Arc::new(
            ProgramApiClient::new(&config.upstream.base_url, config.upstream.credentials())
                .map_err(|e| {
                    IndexingError::config(format!("Failed to create program API client: {}", e))
                })?,
        );

        let processor = TalkProcessor::new(Arc::clone(&source), search);

        let poller = QueuePoller::new(
            queue,
            processor.clone(),
            PollerConfig {
                poll_interval: Duration::from_secs(config.queue.poll_interval_secs),
                max_messages: config.queue.max_messages,
            },
        );

        let reindexer = Reindexer::new(source, processor);

        Ok(Self { poller, reindexer })
    }
}
