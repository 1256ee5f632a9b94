//! # Webhook Receiver
//!
//! Ingress half of the talk search pipeline. Receives webhook calls for talk
//! change events, verifies their HMAC signature over the raw body, and
//! enqueues authenticated events for the indexer worker. The receiver itself
//! is stateless; durability starts at the queue.

pub mod config;
pub mod server;
pub mod signature;

pub use config::ReceiverConfig;

use thiserror::Error;

/// Errors that can occur during receiver startup.
#[derive(Error, Debug)]
pub enum ReceiverError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP server error.
    #[error("Server error: {0}")]
    ServerError(String),
}

impl ReceiverError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::ServerError(msg.into())
    }
}
