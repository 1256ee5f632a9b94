//! # Talk Indexer Queue
//!
//! This crate provides the queue transport used between the webhook receiver
//! and the indexer worker. It defines the [`QueueProvider`] trait consumed by
//! both binaries and a concrete client speaking the SQS-compatible JSON
//! protocol over HTTP.
//!
//! The transport guarantees at-least-once delivery: a received message stays
//! invisible for the queue's visibility window and is redelivered unless it
//! is explicitly deleted with its receipt handle.

pub mod errors;
pub mod interfaces;
pub mod sqs;
pub mod types;

pub use errors::QueueError;
pub use interfaces::QueueProvider;
pub use sqs::SqsQueueClient;
pub use types::{MessageAttributes, QueueMessage};
