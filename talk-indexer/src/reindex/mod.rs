//! Bulk reindex orchestration.
//!
//! Sweeps whole conferences through the same transform-and-upsert core the
//! queue path uses, bypassing the queue. The run is non-atomic and tolerant
//! of partial failure: a conference that cannot be fetched is skipped, a
//! talk that cannot be decoded or written is skipped, and both are counted.
//! Re-invoking the sweep simply overwrites already-indexed talks.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::errors::IngestError;
use crate::processor::TalkProcessor;
use crate::upstream::TalkSource;
use talk_indexer_shared::TalkRecord;

/// Talks between progress log lines.
const PROGRESS_LOG_INTERVAL: usize = 10;

/// Counters emitted by one reindex run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexSummary {
    pub talks_indexed: usize,
    pub talk_failures: usize,
    pub conference_failures: usize,
}

/// Orchestrator for the bulk reindex sweep.
pub struct Reindexer {
    source: Arc<dyn TalkSource>,
    processor: TalkProcessor,
}

impl Reindexer {
    /// Create a new reindexer.
    pub fn new(source: Arc<dyn TalkSource>, processor: TalkProcessor) -> Self {
        Self { source, processor }
    }

    /// Reindex every talk of every given conference.
    ///
    /// Never fails as a whole; per-conference and per-talk failures are
    /// logged and counted in the returned summary.
    pub async fn reindex_conferences(&self, conference_ids: &[String]) -> ReindexSummary {
        info!(conference_ids = ?conference_ids, "Starting reindex");

        let mut summary = ReindexSummary::default();

        for conference_id in conference_ids {
            match self.source.fetch_conference_talks(conference_id).await {
                Ok(talks) => {
                    info!(
                        conference_id = %conference_id,
                        talk_count = talks.len(),
                        "Reindexing conference"
                    );

                    let (indexed, failed) = self.reindex_talks(conference_id, talks).await;
                    summary.talks_indexed += indexed;
                    summary.talk_failures += failed;

                    info!(
                        conference_id = %conference_id,
                        success = indexed,
                        errors = failed,
                        "Completed reindexing conference"
                    );
                }
                Err(e) => {
                    error!(
                        conference_id = %conference_id,
                        error = %e,
                        "Failed to fetch talks for conference, skipping"
                    );
                    summary.conference_failures += 1;
                }
            }
        }

        info!(
            talks_indexed = summary.talks_indexed,
            talk_failures = summary.talk_failures,
            conference_failures = summary.conference_failures,
            "Reindex complete for all conferences"
        );

        summary
    }

    /// Index every talk of one conference, isolating per-talk failures.
    async fn reindex_talks(&self, conference_id: &str, talks: Vec<Value>) -> (usize, usize) {
        let total = talks.len();
        let mut indexed = 0;
        let mut failed = 0;

        for (position, talk) in talks.into_iter().enumerate() {
            match self.reindex_talk(talk).await {
                Ok(()) => indexed += 1,
                Err(e) => {
                    error!(
                        conference_id = %conference_id,
                        position = position,
                        error = %e,
                        "Error indexing talk"
                    );
                    failed += 1;
                }
            }

            if (position + 1) % PROGRESS_LOG_INTERVAL == 0 {
                info!(
                    conference_id = %conference_id,
                    progress = position + 1,
                    total = total,
                    "Reindex progress"
                );
            }
        }

        (indexed, failed)
    }

    /// Decode and index one talk payload.
    async fn reindex_talk(&self, talk: Value) -> Result<(), IngestError> {
        let record: TalkRecord =
            serde_json::from_value(talk).map_err(|e| IngestError::invalid_talk(e.to_string()))?;
        self.processor.index_record(&record).await
    }
}
