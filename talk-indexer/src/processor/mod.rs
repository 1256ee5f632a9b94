//! Processor module for the talk indexer.
//!
//! Parses queue message bodies, dispatches on the event kind, and transforms
//! upstream talk records into search documents.

mod dispatcher;
mod events;
mod transformer;

pub use dispatcher::TalkProcessor;
pub use events::{DispatchOutcome, EventEnvelope, TalkEventKind};
pub use transformer::transform;
