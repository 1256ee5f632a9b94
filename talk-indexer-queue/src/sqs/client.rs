//! SQS-compatible queue client implementation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::QueueError;
use crate::interfaces::QueueProvider;
use crate::sqs::protocol::{
    DeleteMessageRequest, DeleteMessageResponse, MessageAttributeValue, ReceiveMessageRequest,
    ReceiveMessageResponse, SendMessageRequest, SendMessageResponse, CONTENT_TYPE_AMZ_JSON,
    TARGET_DELETE_MESSAGE, TARGET_RECEIVE_MESSAGE, TARGET_SEND_MESSAGE,
};
use crate::types::{MessageAttributes, QueueMessage};

/// Attribute value used when a message carries no explicit attribute.
const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// Overall request deadline; must exceed the 20s long-poll wait.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(40);

/// Maximum length of an error body kept in a [`QueueError`].
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// Queue client speaking the SQS JSON protocol.
///
/// Every operation is a POST to the configured endpoint with an
/// `X-Amz-Target` header naming the action and the queue URL in the request
/// body.
pub struct SqsQueueClient {
    http: reqwest::Client,
    endpoint: String,
    queue_url: String,
}

impl SqsQueueClient {
    /// Create a new client for the given endpoint and queue URL.
    pub fn new(
        endpoint: impl Into<String>,
        queue_url: impl Into<String>,
    ) -> Result<Self, QueueError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QueueError::transport(e.to_string()))?;

        let endpoint = endpoint.into();
        let queue_url = queue_url.into();

        info!(endpoint = %endpoint, queue_url = %queue_url, "Created queue client");

        Ok(Self {
            http,
            endpoint,
            queue_url,
        })
    }

    /// Issue one protocol call and decode its response.
    async fn call<Req, Resp>(&self, target: &str, request: &Req) -> Result<Resp, QueueError>
    where
        Req: Serialize,
        Resp: DeserializeOwned + Default,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Amz-Target", target)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_AMZ_JSON)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| QueueError::transport(e.to_string()))?;

        if !status.is_success() {
            let snippet: String = text.chars().take(ERROR_BODY_SNIPPET_LEN).collect();
            return Err(QueueError::protocol(status.as_u16(), snippet));
        }

        // Some brokers answer state-changing calls with an empty body.
        if text.trim().is_empty() {
            return Ok(Resp::default());
        }

        serde_json::from_str(&text).map_err(|e| QueueError::decode(e.to_string()))
    }
}

#[async_trait]
impl QueueProvider for SqsQueueClient {
    async fn send_message(
        &self,
        body: &str,
        attributes: &MessageAttributes,
    ) -> Result<(), QueueError> {
        let mut message_attributes = HashMap::new();
        message_attributes.insert(
            "eventType",
            MessageAttributeValue::string(&attributes.event_type),
        );
        message_attributes.insert(
            "eventId",
            MessageAttributeValue::string(&attributes.event_id),
        );

        let request = SendMessageRequest {
            queue_url: &self.queue_url,
            message_body: body,
            message_attributes,
        };

        let response: SendMessageResponse = self.call(TARGET_SEND_MESSAGE, &request).await?;
        debug!(
            message_id = response.message_id.as_deref().unwrap_or_default(),
            event_type = %attributes.event_type,
            "Sent message to queue"
        );
        Ok(())
    }

    async fn receive_messages(
        &self,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let request = ReceiveMessageRequest {
            queue_url: &self.queue_url,
            max_number_of_messages: max_messages,
            wait_time_seconds,
            message_attribute_names: vec!["All"],
        };

        let response: ReceiveMessageResponse = self.call(TARGET_RECEIVE_MESSAGE, &request).await?;

        let messages = response
            .messages
            .into_iter()
            .map(|message| {
                let attribute = |name: &str| {
                    message
                        .message_attributes
                        .get(name)
                        .and_then(|a| a.string_value.clone())
                        .unwrap_or_else(|| UNKNOWN_ATTRIBUTE.to_string())
                };
                let attributes = MessageAttributes {
                    event_type: attribute("eventType"),
                    event_id: attribute("eventId"),
                };

                QueueMessage {
                    message_id: message.message_id,
                    receipt_handle: message.receipt_handle,
                    body: message.body,
                    attributes,
                }
            })
            .collect();

        Ok(messages)
    }

    async fn delete_message(&self, receipt_handle: &str) -> Result<(), QueueError> {
        let request = DeleteMessageRequest {
            queue_url: &self.queue_url,
            receipt_handle,
        };

        let _: DeleteMessageResponse = self.call(TARGET_DELETE_MESSAGE, &request).await?;
        Ok(())
    }
}
