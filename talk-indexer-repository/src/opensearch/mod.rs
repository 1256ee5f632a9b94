//! OpenSearch backend for the talk index.

mod index_config;
mod provider;

pub use index_config::{get_index_settings, IndexConfig};
pub use provider::OpenSearchProvider;
