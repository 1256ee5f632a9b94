//! Shared state for the HTTP handlers.

use std::sync::Arc;

use talk_indexer_queue::QueueProvider;

/// State handed to every handler.
///
/// Both fields are read-only after startup; handlers share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<dyn QueueProvider>,
    pub webhook_secret: String,
}
