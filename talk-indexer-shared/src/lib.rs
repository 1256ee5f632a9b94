//! # Talk Indexer Shared
//!
//! This crate defines shared data structures and types used across the talk indexer ecosystem.
//! It includes the typed upstream talk representation and the flat search document produced
//! from it during indexing.

pub mod types;

pub use types::talk_document::{
    average_rating, CommentEntry, RatingEntry, SpeakerEntry, TalkDocument,
};
pub use types::talk_record::{
    FeedbackRecord, SpeakerData, SpeakerRecord, TalkData, TalkRecord, Versioned,
};
