//! Error types for the talk indexer worker.

use thiserror::Error;

use crate::upstream::UpstreamError;
use talk_indexer_queue::QueueError;
use talk_indexer_repository::SearchIndexError;

/// Errors that can occur while processing events and indexing talks.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The queue message body is missing required fields.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// A talk payload could not be decoded into a record.
    #[error("Invalid talk record: {0}")]
    InvalidTalk(String),

    /// Error from the program API.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    SearchIndex(#[from] SearchIndexError),

    /// Error from the queue transport.
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

impl IngestError {
    /// Create a malformed message error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedMessage(msg.into())
    }

    /// Create an invalid talk error.
    pub fn invalid_talk(msg: impl Into<String>) -> Self {
        Self::InvalidTalk(msg.into())
    }
}
