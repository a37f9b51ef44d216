//! Ingestion Data Types

use serde::{Deserialize, Serialize};

/// Body of an ingestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Title the words are stored under; normalized before use.
    pub title: String,
    /// Where the book's text is fetched from (`.html` or `.txt`).
    pub url: String,
    /// How many ranked words to return. Falls back to the configured default.
    pub k: Option<usize>,
}
