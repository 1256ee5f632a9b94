//! Queue provider trait definition.
//!
//! This module defines the abstract interface for the queue transport,
//! allowing the binaries to be tested against mock implementations.

use async_trait::async_trait;

use crate::errors::QueueError;
use crate::types::{MessageAttributes, QueueMessage};

/// Abstracts the underlying queue transport.
///
/// The webhook receiver only sends; the worker only receives and deletes.
/// Implementations must provide at-least-once semantics: a message that is
/// received but never deleted becomes visible again and is redelivered.
#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Enqueue a message body with its attributes.
    async fn send_message(
        &self,
        body: &str,
        attributes: &MessageAttributes,
    ) -> Result<(), QueueError>;

    /// Receive up to `max_messages` messages, long-polling for at most
    /// `wait_time_seconds` before returning an empty batch.
    async fn receive_messages(
        &self,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<QueueMessage>, QueueError>;

    /// Delete (acknowledge) a message by its receipt handle.
    async fn delete_message(&self, receipt_handle: &str) -> Result<(), QueueError>;
}
