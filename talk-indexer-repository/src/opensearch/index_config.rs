//! OpenSearch index configuration and mappings.
//!
//! This module defines the settings and mappings for the talk search index.

use serde_json::{json, Value};

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all document operations.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Default index name when none is configured.
pub const DEFAULT_INDEX_NAME: &str = "talks";

/// Get the index settings and mappings for the talk search index.
///
/// Identifier and enumeration fields are keywords for filtering; title,
/// abstract, and comment bodies are full-text. `lastUpdated`, `publishedAt`,
/// and feedback `created` values are upstream strings with no guaranteed
/// date format, so they stay dynamically mapped.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "talkId": { "type": "keyword" },
                "conferenceId": { "type": "keyword" },
                "title": { "type": "text" },
                "abstract": { "type": "text" },
                "status": { "type": "keyword" },
                "format": { "type": "keyword" },
                "language": { "type": "keyword" },
                "length": { "type": "keyword" },
                "speakers": {
                    "properties": {
                        "speakerId": { "type": "keyword" },
                        "name": { "type": "text" },
                        "email": { "type": "keyword" },
                        "bio": { "type": "text" }
                    }
                },
                "comments": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "author": { "type": "keyword" },
                        "comment": { "type": "text" },
                        "created": { "type": "keyword" }
                    }
                },
                "ratings": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "author": { "type": "keyword" },
                        "rating": { "type": "keyword" },
                        "created": { "type": "keyword" }
                    }
                },
                "avgRating": { "type": "float" },
                "room": { "type": "keyword" },
                "slot": { "type": "keyword" },
                "indexed_at": { "type": "date" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(settings["mappings"]["properties"]["talkId"]["type"], "keyword");
        assert_eq!(settings["mappings"]["properties"]["title"]["type"], "text");
        assert_eq!(
            settings["mappings"]["properties"]["avgRating"]["type"],
            "float"
        );
        assert_eq!(
            settings["mappings"]["properties"]["indexed_at"]["type"],
            "date"
        );
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(DEFAULT_INDEX_NAME, "talks");
    }
}
