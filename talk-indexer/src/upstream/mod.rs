//! Upstream program API access.
//!
//! The worker never caches talk data; every event triggers a fresh fetch so
//! the indexed document reflects the current upstream state. Retries are
//! delegated to the caller - queue redelivery for event processing, per-item
//! isolation for the bulk reindex.

mod program_api;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use talk_indexer_shared::TalkRecord;

pub use program_api::ProgramApiClient;

/// Errors from the program API.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Failed to reach the program API.
    #[error("Request to program API failed: {0}")]
    TransportError(String),

    /// The program API answered with a non-success status.
    #[error("Program API returned {status}: {snippet}")]
    StatusError { status: u16, snippet: String },

    /// Failed to decode a program API response.
    #[error("Failed to decode program API response: {0}")]
    DecodeError(String),
}

impl UpstreamError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, snippet: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            snippet: snippet.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

/// Source of talk data, implemented by [`ProgramApiClient`].
///
/// A trait seam so the processor and reindexer can be exercised against mock
/// sources in tests.
#[async_trait]
pub trait TalkSource: Send + Sync {
    /// Fetch a single talk by id.
    async fn fetch_talk(&self, talk_id: &str) -> Result<TalkRecord, UpstreamError>;

    /// Fetch all talks of a conference.
    ///
    /// Returns raw JSON values rather than decoded records so the bulk
    /// reindex can isolate a single undecodable talk instead of failing the
    /// whole conference.
    async fn fetch_conference_talks(
        &self,
        conference_id: &str,
    ) -> Result<Vec<Value>, UpstreamError>;
}
