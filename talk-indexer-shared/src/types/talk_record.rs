//! Typed schema for the upstream talk representation.
//!
//! The program API wraps each logical field of a talk in a versioned
//! `{"value": ...}` object. [`Versioned`] is the single named decoding step
//! for that convention; the rest of the schema is plain `serde` structs with
//! explicit optional fields, decoded once per payload.

use serde::Deserialize;
use serde_json::Value;

/// A versioned field wrapper from the upstream data model.
///
/// Upstream stores `{"title": {"value": "Keynote"}}`. A missing or null
/// inner value decodes to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Versioned<T> {
    #[serde(default)]
    pub value: Option<T>,
}

impl<T> Versioned<T> {
    /// The unwrapped inner value, if present.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

/// A single talk as returned by the program API.
///
/// Only `id` is required; every other field may be absent and the document
/// transform supplies the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TalkRecord {
    pub id: String,
    #[serde(rename = "conferenceid", default)]
    pub conference_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub data: TalkData,
    #[serde(default)]
    pub speakers: Vec<SpeakerRecord>,
}

/// The nested `data` object of a talk, with every logical field wrapped in
/// the versioned-field convention.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkData {
    #[serde(default)]
    pub title: Option<Versioned<String>>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<Versioned<String>>,
    #[serde(default)]
    pub format: Option<Versioned<String>>,
    #[serde(default)]
    pub language: Option<Versioned<String>>,
    #[serde(default)]
    pub length: Option<Versioned<String>>,
    #[serde(default)]
    pub room: Option<Versioned<String>>,
    #[serde(rename = "starttime", default)]
    pub start_time: Option<Versioned<String>>,
    /// Program-committee tags; kept as opaque JSON (entries carry authors).
    #[serde(default)]
    pub tags: Option<Versioned<Vec<Value>>>,
    #[serde(default)]
    pub keywords: Option<Versioned<Vec<Value>>>,
    /// Committee feedback; comments and ratings share this collection and
    /// are told apart by the `type` discriminator.
    #[serde(rename = "pkomfeedbacks", default)]
    pub feedbacks: Option<Versioned<Vec<FeedbackRecord>>>,
}

/// One entry of the `pkomfeedbacks` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub id: String,
    /// Discriminator: `"comment"` or `"rating"`; anything else is dropped.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Ordinal rating value (`ONE`..`FIVE`) when `kind` is `"rating"`.
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub created: String,
}

/// A speaker attached to a talk.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub data: SpeakerData,
}

/// The speaker's nested data object; `bio` uses the same versioned wrap as
/// the talk fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeakerData {
    #[serde(default)]
    pub bio: Option<Versioned<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_versioned_fields() {
        let raw = r#"{
            "id": "talk-1",
            "conferenceid": "conf-1",
            "status": "SUBMITTED",
            "data": {
                "title": {"value": "Ownership in Practice"},
                "length": {"value": "45"},
                "room": {"value": null}
            }
        }"#;

        let record: TalkRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "talk-1");
        assert_eq!(record.conference_id.as_deref(), Some("conf-1"));
        assert_eq!(
            record.data.title.as_ref().and_then(Versioned::get),
            Some(&"Ownership in Practice".to_string())
        );
        assert_eq!(
            record.data.length.as_ref().and_then(Versioned::get),
            Some(&"45".to_string())
        );
        // Present wrapper with a null value unwraps to None.
        assert!(record.data.room.as_ref().and_then(Versioned::get).is_none());
        // Absent wrapper is None as well.
        assert!(record.data.format.is_none());
    }

    #[test]
    fn missing_id_is_an_error() {
        let raw = r#"{"status": "DRAFT"}"#;
        assert!(serde_json::from_str::<TalkRecord>(raw).is_err());
    }

    #[test]
    fn decodes_feedbacks_and_speakers() {
        let raw = r#"{
            "id": "talk-2",
            "data": {
                "pkomfeedbacks": {"value": [
                    {"type": "comment", "id": "c1", "author": "pk1", "comment": "Solid", "created": "2024-01-01"},
                    {"type": "rating", "id": "r1", "author": "pk2", "rating": "FOUR", "created": "2024-01-02"}
                ]}
            },
            "speakers": [
                {"id": "s1", "name": "Ada", "email": "ada@example.org", "data": {"bio": {"value": "Compiler person"}}}
            ]
        }"#;

        let record: TalkRecord = serde_json::from_str(raw).unwrap();
        let feedbacks = record
            .data
            .feedbacks
            .as_ref()
            .and_then(Versioned::get)
            .unwrap();
        assert_eq!(feedbacks.len(), 2);
        assert_eq!(feedbacks[0].kind.as_deref(), Some("comment"));
        assert_eq!(feedbacks[1].rating.as_deref(), Some("FOUR"));

        assert_eq!(record.speakers.len(), 1);
        assert_eq!(
            record.speakers[0].data.bio.as_ref().and_then(Versioned::get),
            Some(&"Compiler person".to_string())
        );
    }
}
