//! This module defines the core data structures used across the talk indexer.
//! It re-exports the upstream `TalkRecord` schema and the `TalkDocument` projection.

pub mod talk_document;
pub mod talk_record;

pub use talk_document::{CommentEntry, RatingEntry, SpeakerEntry, TalkDocument};
pub use talk_record::{FeedbackRecord, SpeakerRecord, TalkData, TalkRecord, Versioned};
