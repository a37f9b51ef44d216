//! Error Taxonomy
//!
//! Failures that can cross a module boundary. Fetch and storage failures travel up
//! to the pipeline boundary, where they are folded into a
//! [`PipelineOutcome::Failed`](crate::types::PipelineOutcome). Tokenizer anomalies
//! never leave the tokenizer and therefore have no type here.

use thiserror::Error;

/// Failure while obtaining the raw document for an ingestion attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The locator is empty or not a URL the fetcher can request.
    #[error("invalid source locator '{0}'")]
    InvalidLocator(String),

    /// Transport-level failure: DNS, connect, timeout, body read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered, but not with a success status.
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The fetched bytes are not valid UTF-8 text.
    #[error("document at {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Failure while initializing, writing to or reading from the frequency store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A row of an insert batch failed. The `inserted` rows before it were committed.
    #[error("insert for '{book}' stopped after {inserted} rows: {source}")]
    PartialInsert {
        book: String,
        inserted: usize,
        #[source]
        source: rusqlite::Error,
    },
}

/// Everything that can stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("'{0}' is already in the database")]
    AlreadyIngested(String),
}
