//! Request and response shapes of the SQS JSON protocol.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `Content-Type` for all protocol calls.
pub const CONTENT_TYPE_AMZ_JSON: &str = "application/x-amz-json-1.0";

/// `X-Amz-Target` values for the operations the pipeline uses.
pub const TARGET_SEND_MESSAGE: &str = "AmazonSQS.SendMessage";
pub const TARGET_RECEIVE_MESSAGE: &str = "AmazonSQS.ReceiveMessage";
pub const TARGET_DELETE_MESSAGE: &str = "AmazonSQS.DeleteMessage";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttributeValue<'a> {
    pub data_type: &'a str,
    pub string_value: &'a str,
}

impl<'a> MessageAttributeValue<'a> {
    pub fn string(value: &'a str) -> Self {
        Self {
            data_type: "String",
            string_value: value,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageRequest<'a> {
    pub queue_url: &'a str,
    pub message_body: &'a str,
    pub message_attributes: HashMap<&'a str, MessageAttributeValue<'a>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageResponse {
    #[serde(default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiveMessageRequest<'a> {
    pub queue_url: &'a str,
    pub max_number_of_messages: i32,
    pub wait_time_seconds: i32,
    pub message_attribute_names: Vec<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiveMessageResponse {
    #[serde(default)]
    pub messages: Vec<ReceivedMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceivedMessage {
    #[serde(default)]
    pub message_id: String,
    pub receipt_handle: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub message_attributes: HashMap<String, ReceivedAttributeValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceivedAttributeValue {
    #[serde(default)]
    pub string_value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMessageRequest<'a> {
    pub queue_url: &'a str,
    pub receipt_handle: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteMessageResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_request_serializes_pascal_case() {
        let mut attributes = HashMap::new();
        attributes.insert("eventType", MessageAttributeValue::string("talk.created"));

        let request = SendMessageRequest {
            queue_url: "http://localhost:9324/queue/talks",
            message_body: "{\"eventType\":\"talk.created\"}",
            message_attributes: attributes,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["QueueUrl"], "http://localhost:9324/queue/talks");
        assert_eq!(
            value["MessageAttributes"]["eventType"]["DataType"],
            "String"
        );
        assert_eq!(
            value["MessageAttributes"]["eventType"]["StringValue"],
            "talk.created"
        );
    }

    #[test]
    fn receive_response_parses_messages() {
        let raw = json!({
            "Messages": [{
                "MessageId": "m-1",
                "ReceiptHandle": "rh-1",
                "Body": "{\"eventType\":\"talk.updated\",\"entityId\":\"t1\"}",
                "MessageAttributes": {
                    "eventType": {"DataType": "String", "StringValue": "talk.updated"},
                    "eventId": {"DataType": "String", "StringValue": "e-1"}
                }
            }]
        });

        let response: ReceiveMessageResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.messages.len(), 1);
        let message = &response.messages[0];
        assert_eq!(message.message_id, "m-1");
        assert_eq!(message.receipt_handle, "rh-1");
        assert_eq!(
            message.message_attributes["eventType"].string_value.as_deref(),
            Some("talk.updated")
        );
    }

    #[test]
    fn receive_response_tolerates_empty_object() {
        let response: ReceiveMessageResponse = serde_json::from_str("{}").unwrap();
        assert!(response.messages.is_empty());
    }
}
