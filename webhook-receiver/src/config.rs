//! Receiver configuration.
//!
//! Environment variables are read once into an immutable [`ReceiverConfig`]
//! constructed at startup; handlers only see the state built from it.

use std::env;

use url::Url;

use crate::ReceiverError;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 8083;

/// Default AWS-style region, logged at startup.
const DEFAULT_REGION: &str = "eu-west-1";

/// Immutable receiver configuration.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Shared secret for webhook signature verification.
    pub webhook_secret: String,
    /// HTTP endpoint the queue protocol posts to.
    pub queue_endpoint: String,
    /// Queue URL named in every protocol request.
    pub queue_url: String,
    /// AWS-style region; informational, signing is left to the deployment.
    pub region: String,
}

impl ReceiverConfig {
    /// Read the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: HTTP listen port (default: 8083)
    /// - `WEBHOOK_SECRET`: shared secret (required)
    /// - `SQS_QUEUE_URL`: queue URL (required)
    /// - `QUEUE_ENDPOINT`: queue HTTP endpoint (default: origin of the queue URL)
    /// - `AWS_REGION`: region name (default: eu-west-1)
    pub fn from_env() -> Result<Self, ReceiverError> {
        let queue_url = require("SQS_QUEUE_URL")?;
        let queue_endpoint = match env::var("QUEUE_ENDPOINT") {
            Ok(endpoint) => endpoint,
            Err(_) => queue_origin(&queue_url)?,
        };

        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            webhook_secret: require("WEBHOOK_SECRET")?,
            queue_endpoint,
            queue_url,
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        })
    }
}

/// Read a required environment variable.
fn require(name: &str) -> Result<String, ReceiverError> {
    env::var(name).map_err(|_| ReceiverError::config(format!("{} not set", name)))
}

/// Derive the protocol endpoint from the queue URL's origin.
fn queue_origin(queue_url: &str) -> Result<String, ReceiverError> {
    let url = Url::parse(queue_url)
        .map_err(|e| ReceiverError::config(format!("invalid SQS_QUEUE_URL: {}", e)))?;
    Ok(url.origin().ascii_serialization())
}
