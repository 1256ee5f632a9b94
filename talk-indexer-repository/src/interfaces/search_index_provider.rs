//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations and mock providers in
//! tests.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::SearchIndexError;
use talk_indexer_shared::TalkDocument;

/// Abstracts the underlying search index implementation.
///
/// Both operations are single-document writes keyed by the stable talk id;
/// there are no cross-document transactions. Repeating a write with the same
/// id and content leaves the stored state unchanged beyond the first
/// application, which is what lets the queue deliver a message more than
/// once without corrupting the index.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index exists, creating it with its settings and
    /// mappings if necessary. Called once during application startup.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Replace the full document stored at `talk_id` (index-or-overwrite).
    async fn index_document(
        &self,
        talk_id: &str,
        document: &TalkDocument,
    ) -> Result<(), SearchIndexError>;

    /// Merge only the given fields into the existing document at `talk_id`.
    ///
    /// Fails with [`SearchIndexError::DocumentNotFound`] when the document
    /// does not exist; callers use this only for already-indexed talks.
    async fn update_document(
        &self,
        talk_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError>;
}
