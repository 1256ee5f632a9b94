//! # Talk Indexer
//!
//! Worker half of the talk search pipeline - consumes webhook events from
//! the queue and projects the referenced talks into OpenSearch documents.
//!
//! ## Architecture
//!
//! 1. **Consumer**: Long-polls the queue for webhook events
//! 2. **Processor**: Dispatches each event and transforms talks into documents
//! 3. **Upstream**: Fetches fresh talk data from the program API
//! 4. **Reindex**: Bulk sweep over whole conferences, bypassing the queue
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Queue poller
//! - [`processor`]: Event dispatch and the talk-to-document transform
//! - [`upstream`]: Program API client
//! - [`reindex`]: Bulk reindex orchestration
//! - [`errors`]: Error types for the worker

pub mod config;
pub mod consumer;
pub mod errors;
pub mod processor;
pub mod reindex;
pub mod upstream;

pub use config::{Config, Dependencies};
pub use errors::IngestError;

use thiserror::Error;

/// Errors that can occur during worker initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
