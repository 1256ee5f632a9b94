//! Program API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::upstream::{TalkSource, UpstreamError};
use talk_indexer_shared::TalkRecord;

/// Timeout for a single-talk fetch.
const TALK_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for a whole-conference fetch; the sessions list can be large.
const CONFERENCE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum length of an error body kept in an [`UpstreamError`].
const ERROR_BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Default, Deserialize)]
struct SessionsResponse {
    #[serde(default)]
    sessions: Vec<Value>,
}

/// HTTP client for the program API.
pub struct ProgramApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl ProgramApiClient {
    /// Create a new client for the given base URL with optional basic auth.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<(String, String)>,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .connect_timeout(TALK_FETCH_TIMEOUT)
            .build()
            .map_err(|e| UpstreamError::transport(e.to_string()))?;

        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        info!(base_url = %base_url, "Created program API client");

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Issue one GET and decode the 200 response body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, UpstreamError> {
        let mut request = self.http.get(url).timeout(timeout);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::transport(e.to_string()))?;

        if status.as_u16() != 200 {
            let snippet: String = text.chars().take(ERROR_BODY_SNIPPET_LEN).collect();
            return Err(UpstreamError::status(status.as_u16(), snippet));
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::decode(e.to_string()))
    }
}

#[async_trait]
impl TalkSource for ProgramApiClient {
    async fn fetch_talk(&self, talk_id: &str) -> Result<TalkRecord, UpstreamError> {
        let url = format!("{}/data/session/{}", self.base_url, talk_id);
        debug!(talk_id = %talk_id, "Fetching talk from program API");
        self.get_json(&url, TALK_FETCH_TIMEOUT).await
    }

    async fn fetch_conference_talks(
        &self,
        conference_id: &str,
    ) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/data/conference/{}/session", self.base_url, conference_id);
        debug!(conference_id = %conference_id, "Fetching conference talks from program API");
        let response: SessionsResponse = self.get_json(&url, CONFERENCE_FETCH_TIMEOUT).await?;
        Ok(response.sessions)
    }
}
