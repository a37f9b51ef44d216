//! Storage Data Types
//!
//! The record shape shared by every store implementation and the
//! [`FrequencyStore`] contract the pipelines are written against.

use crate::analysis::frequency::WordFrequencies;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};

/// One persisted `(book, word, frequency)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub book: String,
    pub word: String,
    pub frequency: u32,
}

/// A `(word, count)` pair as returned by a ranked query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u32) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Persisted collection of frequency records.
///
/// Every method is a self-contained unit of work. Book titles are expected to be
/// normalized by the caller.
pub trait FrequencyStore: Send + Sync {
    /// Ensures the record collection exists. Safe to call on every startup.
    fn initialize(&self) -> Result<(), StorageError>;

    /// Appends one record per `(word, count)` pair under `book` and returns the
    /// number of rows written.
    ///
    /// Rows written before a failing row stay committed; the failure is reported
    /// as [`StorageError::PartialInsert`].
    fn insert(&self, book: &str, frequencies: &WordFrequencies) -> Result<usize, StorageError>;

    /// Inserts like [`insert`](Self::insert), but only when `book` has no rows yet.
    ///
    /// The check and the write happen under one lock, so of two concurrent calls
    /// for the same title at most one writes. Returns `None` when rows already
    /// existed and nothing was written.
    fn insert_if_absent(
        &self,
        book: &str,
        frequencies: &WordFrequencies,
    ) -> Result<Option<usize>, StorageError>;

    /// Whether any record exists for `book`.
    fn exists(&self, book: &str) -> Result<bool, StorageError>;

    /// Records of `book` with `count >= min_frequency`, by count descending and
    /// then by word ascending.
    fn query(&self, book: &str, min_frequency: u32) -> Result<Vec<WordCount>, StorageError>;

    /// Irreversibly deletes every record of every book. The store stays usable.
    fn reset(&self) -> Result<(), StorageError>;
}

/// Sorts into rank order: count descending, ties broken by word ascending.
pub fn sort_by_rank(words: &mut [WordCount]) {
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
}
