//! Event envelope parsing and dispatch outcomes.

use serde_json::Value;

use crate::errors::IngestError;

/// The closed set of webhook event kinds.
///
/// Anything outside the known set lands in `Unrecognized`, which is handled
/// (acknowledged without side effects) rather than treated as an error - an
/// unknown event type must never block the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalkEventKind {
    Created,
    Updated,
    Published,
    Unpublished,
    Unrecognized(String),
}

impl TalkEventKind {
    /// Parse the `eventType` string into an event kind.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "talk.created" => Self::Created,
            "talk.updated" => Self::Updated,
            "talk.published" => Self::Published,
            "talk.unpublished" => Self::Unpublished,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// A parsed queue message body.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub kind: TalkEventKind,
    pub entity_id: String,
}

impl EventEnvelope {
    /// Parse a message body, requiring the `eventType` and `entityId` string
    /// fields.
    pub fn from_json(body: &str) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| IngestError::malformed(format!("body is not JSON: {}", e)))?;

        let event_type = value
            .get("eventType")
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::malformed("missing string field eventType"))?;
        let entity_id = value
            .get("entityId")
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::malformed("missing string field entityId"))?;

        Ok(Self {
            kind: TalkEventKind::parse(event_type),
            entity_id: entity_id.to_string(),
        })
    }
}

/// Per-message result of dispatching one queue message.
///
/// The poller inspects this instead of relying on control flow: `Ack`
/// deletes the message, `Retry` leaves it for redelivery (and eventually the
/// dead-letter queue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ack,
    Retry(String),
}
