//! The talk-to-document transform.
//!
//! Pure projection from the upstream [`TalkRecord`] to the flat
//! [`TalkDocument`] written to the search index. Deterministic given a fixed
//! `indexed_at`; the only state the caller supplies is that timestamp.

use chrono::{DateTime, Utc};
use serde_json::Value;

use talk_indexer_shared::{
    average_rating, CommentEntry, FeedbackRecord, RatingEntry, SpeakerEntry, TalkDocument,
    TalkRecord, Versioned,
};

/// Status assigned when the upstream record carries none.
const DEFAULT_STATUS: &str = "DRAFT";

/// Project an upstream talk record into a search document.
pub fn transform(record: &TalkRecord, indexed_at: DateTime<Utc>) -> TalkDocument {
    let data = &record.data;

    let feedbacks: &[FeedbackRecord] = data
        .feedbacks
        .as_ref()
        .and_then(|v| v.value.as_deref())
        .unwrap_or(&[]);

    let mut comments = Vec::new();
    let mut ratings = Vec::new();
    for feedback in feedbacks {
        match feedback.kind.as_deref() {
            Some("comment") => comments.push(CommentEntry {
                id: feedback.id.clone(),
                author: feedback.author.clone(),
                comment: feedback.comment.clone().unwrap_or_default(),
                created: feedback.created.clone(),
            }),
            Some("rating") => ratings.push(RatingEntry {
                id: feedback.id.clone(),
                author: feedback.author.clone(),
                rating: feedback.rating.clone().unwrap_or_default(),
                created: feedback.created.clone(),
            }),
            // Feedback without a recognized discriminator is dropped.
            _ => {}
        }
    }

    let avg_rating = average_rating(&ratings);

    let speakers = record
        .speakers
        .iter()
        .map(|speaker| SpeakerEntry {
            speaker_id: speaker.id.clone(),
            name: speaker.name.clone(),
            email: speaker.email.clone(),
            bio: text(&speaker.data.bio),
        })
        .collect();

    TalkDocument {
        talk_id: record.id.clone(),
        conference_id: record.conference_id.clone().unwrap_or_default(),
        title: text(&data.title),
        abstract_text: text(&data.abstract_text),
        status: record
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        format: text(&data.format),
        language: text(&data.language),
        length: text(&data.length),
        tags: array(&data.tags),
        keywords: array(&data.keywords),
        speakers,
        comments,
        ratings,
        avg_rating,
        room: text(&data.room),
        slot: text(&data.start_time),
        last_updated: record.last_updated.clone().unwrap_or_default(),
        published_at: record.published_at.clone(),
        indexed_at,
    }
}

/// Unwrap one versioned text field.
fn text(field: &Option<Versioned<String>>) -> Option<String> {
    field.as_ref().and_then(|v| v.value.clone())
}

/// Unwrap one versioned array field.
fn array(field: &Option<Versioned<Vec<Value>>>) -> Option<Vec<Value>> {
    field.as_ref().and_then(|v| v.value.clone())
}
