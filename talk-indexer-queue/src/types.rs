//! Message types for the queue transport.

/// Attributes carried alongside a queue message body.
///
/// Both values default to `"unknown"` when the originating webhook call did
/// not supply the corresponding header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAttributes {
    pub event_type: String,
    pub event_id: String,
}

impl MessageAttributes {
    pub fn new(event_type: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            event_id: event_id.into(),
        }
    }
}

/// A message received from the queue.
///
/// The `receipt_handle` is the opaque acknowledgment token: deleting the
/// message through it is the only way to acknowledge processing. Holding a
/// `QueueMessage` does not own the underlying queue entry; an undeleted
/// message is redelivered after its visibility window expires.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub message_id: String,
    pub receipt_handle: String,
    /// The original webhook payload, forwarded verbatim.
    pub body: String,
    pub attributes: MessageAttributes,
}
