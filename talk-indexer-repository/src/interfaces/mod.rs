//! Interface definitions for search index backends.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
