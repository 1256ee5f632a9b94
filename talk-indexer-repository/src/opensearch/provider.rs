//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    IndexParts, OpenSearch, UpdateParts,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use talk_indexer_shared::TalkDocument;

/// Maximum length of an error body kept in a [`SearchIndexError`].
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// OpenSearch provider implementation.
///
/// Documents are stored under the talk id, so indexing the same talk twice
/// overwrites rather than duplicates.
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `credentials` - Optional basic-auth username/password pair
    /// * `index_config` - The index configuration
    pub async fn new(
        url: &str,
        credentials: Option<(String, String)>,
        index_config: IndexConfig,
    ) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some((username, password)) = credentials {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_config.name, "Created OpenSearch provider");

        Ok(Self {
            client,
            index_config,
        })
    }

    async fn error_snippet(response: opensearch::http::response::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(ERROR_BODY_SNIPPET_LEN)
            .collect()
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Ensure the talk index exists, creating it with its settings and
    /// mappings when absent.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let index = self.index_config.name.as_str();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %index, "Search index already exists");
            return Ok(());
        }

        info!(index = %index, "Creating search index");

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = Self::error_snippet(response).await;
            error!(index = %index, status = %status, body = %body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Replace the full document stored at `talk_id`.
    async fn index_document(
        &self,
        talk_id: &str,
        document: &TalkDocument,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, talk_id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = Self::error_snippet(response).await;
            error!(talk_id = %talk_id, status = %status, body = %body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, body
            )));
        }

        debug!(talk_id = %talk_id, "Document indexed");
        Ok(())
    }

    /// Merge the given fields into the existing document at `talk_id`.
    async fn update_document(
        &self,
        talk_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .update(UpdateParts::IndexId(&self.index_config.name, talk_id))
            .body(json!({ "doc": fields }))
            .send()
            .await
            .map_err(|e| SearchIndexError::update(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchIndexError::document_not_found(talk_id));
        }
        if !status.is_success() {
            let body = Self::error_snippet(response).await;
            error!(talk_id = %talk_id, status = %status, body = %body, "Update request failed");
            return Err(SearchIndexError::update(format!(
                "Update failed with status {}: {}",
                status, body
            )));
        }

        debug!(talk_id = %talk_id, field_count = fields.len(), "Document updated");
        Ok(())
    }
}
