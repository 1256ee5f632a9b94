//! Search document types for the talk index.
//!
//! This module defines the flat document structure that is indexed in the
//! search engine. Field names follow the wire format consumed by the search
//! frontends, hence the explicit `rename` attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document representation of a talk in the search index.
///
/// `talk_id` is the stable document id for every write: reindexing the same
/// talk overwrites the stored document rather than duplicating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkDocument {
    #[serde(rename = "talkId")]
    pub talk_id: String,
    #[serde(rename = "conferenceId")]
    pub conference_id: String,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub status: String,
    pub format: Option<String>,
    pub language: Option<String>,
    pub length: Option<String>,
    pub tags: Option<Vec<Value>>,
    pub keywords: Option<Vec<Value>>,
    pub speakers: Vec<SpeakerEntry>,
    pub comments: Vec<CommentEntry>,
    pub ratings: Vec<RatingEntry>,
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
    pub room: Option<String>,
    pub slot: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub indexed_at: DateTime<Utc>,
}

/// A speaker as projected into the search document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerEntry {
    #[serde(rename = "speakerId")]
    pub speaker_id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
}

/// A committee comment as projected into the search document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub id: String,
    pub author: String,
    pub comment: String,
    pub created: String,
}

/// A committee rating as projected into the search document.
///
/// `rating` holds the ordinal scale value (`ONE`..`FIVE`); an empty string
/// is kept as-is and scores as the neutral 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub id: String,
    pub author: String,
    pub rating: String,
    pub created: String,
}

impl RatingEntry {
    /// Numeric score for the ordinal rating value.
    ///
    /// Case-insensitive `ONE`..`FIVE` map to 1..5; anything unrecognized
    /// counts as 3.
    pub fn score(&self) -> u32 {
        match self.rating.to_uppercase().as_str() {
            "ONE" => 1,
            "TWO" => 2,
            "THREE" => 3,
            "FOUR" => 4,
            "FIVE" => 5,
            _ => 3,
        }
    }
}

/// Mean rating over the given entries, or 0.0 when there are none.
pub fn average_rating(ratings: &[RatingEntry]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: u32 = ratings.iter().map(RatingEntry::score).sum();
    f64::from(sum) / ratings.len() as f64
}
