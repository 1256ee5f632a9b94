//! HTTP request handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::server::state::AppState;
use crate::signature::verify_signature;

/// Signature header carrying the hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Event type header.
pub const EVENT_TYPE_HEADER: &str = "X-Event-Type";

/// Event id header.
pub const EVENT_ID_HEADER: &str = "X-Event-Id";

/// Attribute value used when a header is absent.
const UNKNOWN: &str = "unknown";

/// Webhook endpoint - verifies the signature over the raw body and enqueues
/// the event.
///
/// The body is taken as raw bytes and forwarded verbatim; the signature is
/// checked before any parsing so re-serialization cannot break it.
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let event_type = header_str(&headers, EVENT_TYPE_HEADER).unwrap_or(UNKNOWN);
    let event_id = header_str(&headers, EVENT_ID_HEADER).unwrap_or(UNKNOWN);

    if !verify_signature(&body, signature, &state.webhook_secret) {
        warn!(event_id = %event_id, "Invalid webhook signature");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid signature"})),
        );
    }

    let body_text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(e) => {
            error!(event_id = %event_id, error = %e, "Webhook body is not valid UTF-8");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            );
        }
    };

    let attributes = talk_indexer_queue::MessageAttributes::new(event_type, event_id);
    match state.queue.send_message(body_text, &attributes).await {
        Ok(()) => {
            info!(event_type = %event_type, event_id = %event_id, "Queued webhook event");
            (StatusCode::OK, Json(json!({"status": "queued"})))
        }
        Err(e) => {
            error!(event_id = %event_id, error = %e, "Error processing webhook");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}

/// Liveness endpoint, independent of queue and configuration state.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Root banner.
pub async fn banner() -> impl IntoResponse {
    (StatusCode::OK, "Talk Webhook Receiver v1.0")
}

/// Read a header as a string, treating non-UTF-8 values as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
