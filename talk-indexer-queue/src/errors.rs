//! Error types for queue transport operations.

use thiserror::Error;

/// Errors from queue transport operations.
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    /// Failed to reach the queue endpoint.
    #[error("Queue transport error: {0}")]
    TransportError(String),

    /// The queue endpoint rejected the request.
    #[error("Queue request failed with status {status}: {body}")]
    ProtocolError { status: u16, body: String },

    /// Failed to decode a queue response.
    #[error("Failed to decode queue response: {0}")]
    DecodeError(String),
}

impl QueueError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a protocol error.
    pub fn protocol(status: u16, body: impl Into<String>) -> Self {
        Self::ProtocolError {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}

impl From<reqwest::Error> for QueueError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
