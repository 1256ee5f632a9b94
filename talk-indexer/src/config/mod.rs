//! Worker configuration.
//!
//! All environment variables are read once, here, into an immutable
//! [`Config`] that is passed into [`Dependencies::new`]. No component reads
//! the environment on its own.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;

use url::Url;

use crate::IndexingError;

/// Default AWS-style region, logged at startup.
const DEFAULT_REGION: &str = "eu-west-1";

/// Default sleep between poll iterations.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default maximum messages per receive call.
const DEFAULT_MAX_MESSAGES: i32 = 10;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default search index name.
const DEFAULT_INDEX_NAME: &str = "talks";

/// Immutable worker configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub queue: QueueConfig,
    pub upstream: UpstreamConfig,
    pub search: SearchConfig,
    pub reindex: ReindexConfig,
}

/// Queue transport settings.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// HTTP endpoint the queue protocol posts to.
    pub endpoint: String,
    /// Queue URL named in every protocol request.
    pub queue_url: String,
    /// AWS-style region; informational, signing is left to the deployment.
    pub region: String,
    pub poll_interval_secs: u64,
    pub max_messages: i32,
}

/// Program API settings.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl UpstreamConfig {
    /// Basic-auth pair, present only when both halves are non-empty.
    pub fn credentials(&self) -> Option<(String, String)> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((self.username.clone(), self.password.clone()))
    }
}

/// Search engine settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub index: String,
}

impl SearchConfig {
    /// Basic-auth pair, present only when both halves are non-empty.
    pub fn credentials(&self) -> Option<(String, String)> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((self.username.clone(), self.password.clone()))
    }
}

/// Reindex-on-start settings.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    pub on_start: bool,
    pub conference_ids: Vec<String>,
}

impl Config {
    /// Read the full configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `SQS_QUEUE_URL`: queue URL (required)
    /// - `QUEUE_ENDPOINT`: queue HTTP endpoint (default: origin of the queue URL)
    /// - `AWS_REGION`: region name (default: eu-west-1)
    /// - `POLL_INTERVAL_SECONDS`: sleep between polls (default: 5)
    /// - `MAX_MESSAGES_PER_POLL`: batch size per receive (default: 10)
    /// - `PROGRAM_API_URL`: program API base URL (required)
    /// - `PROGRAM_API_USERNAME` / `PROGRAM_API_PASSWORD`: optional basic auth
    /// - `OPENSEARCH_URL`: search engine URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: optional basic auth
    /// - `OPENSEARCH_INDEX`: index name (default: talks)
    /// - `REINDEX_ON_START`: "true" to sweep conferences before polling
    /// - `REINDEX_CONFERENCE_IDS`: comma-separated conference ids
    pub fn from_env() -> Result<Self, IndexingError> {
        let queue_url = require("SQS_QUEUE_URL")?;
        let endpoint = match env::var("QUEUE_ENDPOINT") {
            Ok(endpoint) => endpoint,
            Err(_) => queue_origin(&queue_url)?,
        };

        let queue = QueueConfig {
            endpoint,
            queue_url,
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            poll_interval_secs: env::var("POLL_INTERVAL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            max_messages: env::var("MAX_MESSAGES_PER_POLL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_MESSAGES),
        };

        let upstream = UpstreamConfig {
            base_url: require("PROGRAM_API_URL")?,
            username: env::var("PROGRAM_API_USERNAME").unwrap_or_default(),
            password: env::var("PROGRAM_API_PASSWORD").unwrap_or_default(),
        };

        let search = SearchConfig {
            url: env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string()),
            username: env::var("OPENSEARCH_USERNAME").unwrap_or_default(),
            password: env::var("OPENSEARCH_PASSWORD").unwrap_or_default(),
            index: env::var("OPENSEARCH_INDEX").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string()),
        };

        let reindex = ReindexConfig {
            on_start: env::var("REINDEX_ON_START")
                .map(|v| v == "true")
                .unwrap_or(false),
            conference_ids: env::var("REINDEX_CONFERENCE_IDS")
                .map(|ids| {
                    ids.split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            queue,
            upstream,
            search,
            reindex,
        })
    }
}

/// Read a required environment variable.
fn require(name: &str) -> Result<String, IndexingError> {
    env::var(name).map_err(|_| IndexingError::config(format!("{} not set", name)))
}

/// Derive the protocol endpoint from the queue URL's origin.
fn queue_origin(queue_url: &str) -> Result<String, IndexingError> {
    let url = Url::parse(queue_url)
        .map_err(|e| IndexingError::config(format!("invalid SQS_QUEUE_URL: {}", e)))?;
    Ok(url.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_endpoint_from_queue_url() {
        assert_eq!(
            queue_origin("http://localhost:9324/queue/talk-events").unwrap(),
            "http://localhost:9324"
        );
    }

    #[test]
    fn rejects_unparseable_queue_url() {
        assert!(queue_origin("not a url").is_err());
    }
}
