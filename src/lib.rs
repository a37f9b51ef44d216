//! eBook Word Frequency Library
//!
//! Counts how often each word appears in an eBook, stores the counts under the
//! book's title and serves ranked lookups. The binary (`main.rs`) wraps this
//! library in a small HTTP service.
//!
//! ## Modules
//! - **`analysis`**: Markup-aware tokenizer and the word-frequency aggregator.
//! - **`storage`**: The frequency store contract, with SQLite and in-memory backends.
//! - **`ingestion`**: Fetch -> tokenize -> aggregate -> persist for a new book.
//! - **`lookup`**: Ranked, truncated results for a book that is already stored.
//! - **`server`**: HTTP routes over both pipelines.
//! - **`config`**, **`error`**, **`types`**: Settings, error taxonomy and pipeline outcomes.

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod lookup;
pub mod server;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
