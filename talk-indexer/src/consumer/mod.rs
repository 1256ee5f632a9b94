//! Queue poller for the talk indexer.
//!
//! Long-polls the queue, dispatches each message through the processor, and
//! deletes messages only after successful processing. Delivery is
//! at-least-once: an undeleted message is redelivered after its visibility
//! window, and the external queue dead-letters it once the delivery count
//! exceeds the configured threshold.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::errors::IngestError;
use crate::processor::{DispatchOutcome, TalkProcessor};
use talk_indexer_queue::{QueueMessage, QueueProvider};

/// Long-poll wait per receive call.
const RECEIVE_WAIT_TIME_SECS: i32 = 20;

/// Configuration for the queue poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Sleep between poll iterations.
    pub poll_interval: Duration,
    /// Maximum messages per receive call.
    pub max_messages: i32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_messages: 10,
        }
    }
}

/// Poller that drives messages from the queue through the processor.
///
/// Messages within a batch are handled sequentially; documents are
/// independent and writes are idempotent by talk id, so this is a throughput
/// choice, not a correctness requirement.
pub struct QueuePoller {
    queue: Arc<dyn QueueProvider>,
    processor: TalkProcessor,
    config: PollerConfig,
}

impl QueuePoller {
    /// Create a new poller.
    pub fn new(queue: Arc<dyn QueueProvider>, processor: TalkProcessor, config: PollerConfig) -> Self {
        Self {
            queue,
            processor,
            config,
        }
    }

    /// Run the poll loop until the process receives ctrl-c.
    pub async fn run(&self) -> Result<(), IngestError> {
        info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            max_messages = self.config.max_messages,
            "Starting message polling"
        );

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    return Ok(());
                }
                result = self.poll_once() => {
                    if let Err(e) = result {
                        // One sleep after a polling failure, via the shared
                        // end-of-loop wait below.
                        error!(error = %e, "Error polling queue");
                    }
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One poll iteration: receive a batch and handle each message.
    pub async fn poll_once(&self) -> Result<(), IngestError> {
        let messages = self
            .queue
            .receive_messages(self.config.max_messages, RECEIVE_WAIT_TIME_SECS)
            .await?;

        if messages.is_empty() {
            debug!("No messages in queue");
            return Ok(());
        }

        info!(count = messages.len(), "Received messages");
        for message in &messages {
            self.handle_message(message).await;
        }

        Ok(())
    }

    /// Handle one message; failures are isolated here so one bad message
    /// never stops the rest of the batch.
    pub async fn handle_message(&self, message: &QueueMessage) {
        match self.processor.process(&message.body).await {
            DispatchOutcome::Ack => {
                match self.queue.delete_message(&message.receipt_handle).await {
                    Ok(()) => {
                        debug!(message_id = %message.message_id, "Deleted message from queue");
                    }
                    Err(e) => {
                        // The message redelivers; the index write is
                        // idempotent by talk id, so the duplicate is harmless.
                        error!(
                            message_id = %message.message_id,
                            error = %e,
                            "Failed to delete message after processing"
                        );
                    }
                }
            }
            DispatchOutcome::Retry(reason) => {
                error!(
                    message_id = %message.message_id,
                    reason = %reason,
                    "Leaving message for redelivery"
                );
            }
        }
    }
}
