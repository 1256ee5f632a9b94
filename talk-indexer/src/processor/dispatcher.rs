//! Event dispatch implementation.
//!
//! One core processing path (fetch, transform, write) shared by the queue
//! poller and the bulk reindex; the dispatch function wraps it with
//! per-message acknowledgment semantics.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map};
use tracing::{error, info, warn};

use crate::errors::IngestError;
use crate::processor::events::{DispatchOutcome, EventEnvelope, TalkEventKind};
use crate::processor::transformer::transform;
use crate::upstream::TalkSource;
use talk_indexer_repository::SearchIndexProvider;
use talk_indexer_shared::TalkRecord;

/// Status written when a talk is unpublished.
const UNPUBLISHED_STATUS: &str = "DRAFT";

/// Processor that routes webhook events to the search index.
#[derive(Clone)]
pub struct TalkProcessor {
    source: Arc<dyn TalkSource>,
    search: Arc<dyn SearchIndexProvider>,
}

impl TalkProcessor {
    /// Create a new processor over the given talk source and search index.
    pub fn new(source: Arc<dyn TalkSource>, search: Arc<dyn SearchIndexProvider>) -> Self {
        Self { source, search }
    }

    /// Dispatch one queue message body.
    ///
    /// Returns [`DispatchOutcome::Ack`] when the message must be deleted
    /// (processed, or intentionally ignored) and [`DispatchOutcome::Retry`]
    /// when it must stay on the queue for redelivery.
    pub async fn process(&self, body: &str) -> DispatchOutcome {
        let envelope = match EventEnvelope::from_json(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "Failed to parse message body");
                return DispatchOutcome::Retry(e.to_string());
            }
        };

        info!(
            event_kind = ?envelope.kind,
            talk_id = %envelope.entity_id,
            "Processing event"
        );

        match &envelope.kind {
            TalkEventKind::Created | TalkEventKind::Updated | TalkEventKind::Published => {
                match self.index_talk(&envelope.entity_id).await {
                    Ok(()) => {
                        info!(talk_id = %envelope.entity_id, "Indexed talk");
                        DispatchOutcome::Ack
                    }
                    Err(e) => {
                        error!(talk_id = %envelope.entity_id, error = %e, "Failed to index talk");
                        DispatchOutcome::Retry(e.to_string())
                    }
                }
            }
            TalkEventKind::Unpublished => match self.mark_unpublished(&envelope.entity_id).await {
                Ok(()) => {
                    info!(talk_id = %envelope.entity_id, "Marked talk unpublished");
                    DispatchOutcome::Ack
                }
                Err(e) => {
                    error!(talk_id = %envelope.entity_id, error = %e, "Failed to update talk status");
                    DispatchOutcome::Retry(e.to_string())
                }
            },
            TalkEventKind::Unrecognized(raw) => {
                warn!(event_type = %raw, "Unrecognized event type, acknowledging");
                DispatchOutcome::Ack
            }
        }
    }

    /// Fetch a talk from upstream, transform it, and upsert the document.
    pub async fn index_talk(&self, talk_id: &str) -> Result<(), IngestError> {
        let record = self.source.fetch_talk(talk_id).await?;
        self.index_record(&record).await
    }

    /// Transform an already-fetched talk record and upsert the document.
    ///
    /// The document id is the talk id, so repeated writes overwrite.
    pub async fn index_record(&self, record: &TalkRecord) -> Result<(), IngestError> {
        let document = transform(record, Utc::now());
        self.search.index_document(&record.id, &document).await?;
        Ok(())
    }

    /// Partial update: set only the status field to `DRAFT`.
    pub async fn mark_unpublished(&self, talk_id: &str) -> Result<(), IngestError> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(UNPUBLISHED_STATUS));
        self.search.update_document(talk_id, &fields).await?;
        Ok(())
    }
}
