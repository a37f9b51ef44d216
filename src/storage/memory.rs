use super::types::{FrequencyRecord, FrequencyStore, WordCount, sort_by_rank};
use crate::analysis::frequency::WordFrequencies;
use crate::error::StorageError;

use dashmap::DashMap;

/// Volatile frequency store with the same contract as the SQLite one.
///
/// Rows are grouped per book; inserting a book twice appends a second set of rows,
/// exactly as the table does.
#[derive(Debug, Default)]
pub struct MemoryFrequencyStore {
    books: DashMap<String, Vec<FrequencyRecord>>,
}

impl MemoryFrequencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across every book.
    pub fn record_count(&self) -> usize {
        self.books.iter().map(|entry| entry.value().len()).sum()
    }
}

impl FrequencyStore for MemoryFrequencyStore {
    fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn insert(&self, book: &str, frequencies: &WordFrequencies) -> Result<usize, StorageError> {
        let mut rows = self.books.entry(book.to_string()).or_default();
        rows.extend(records(book, frequencies));

        tracing::debug!("Inserted {} rows for '{}'", frequencies.len(), book);
        Ok(frequencies.len())
    }

    fn insert_if_absent(
        &self,
        book: &str,
        frequencies: &WordFrequencies,
    ) -> Result<Option<usize>, StorageError> {
        // The entry guard holds the shard lock across the check and the write.
        let mut rows = self.books.entry(book.to_string()).or_default();
        if !rows.is_empty() {
            tracing::debug!("Rows for '{}' already present, nothing inserted", book);
            return Ok(None);
        }

        rows.extend(records(book, frequencies));
        tracing::debug!("Inserted {} rows for '{}'", frequencies.len(), book);
        Ok(Some(frequencies.len()))
    }

    fn exists(&self, book: &str) -> Result<bool, StorageError> {
        Ok(self
            .books
            .get(book)
            .map(|rows| !rows.is_empty())
            .unwrap_or(false))
    }

    fn query(&self, book: &str, min_frequency: u32) -> Result<Vec<WordCount>, StorageError> {
        let mut words: Vec<WordCount> = self
            .books
            .get(book)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.frequency >= min_frequency)
                    .map(|row| WordCount::new(row.word.clone(), row.frequency))
                    .collect()
            })
            .unwrap_or_default();

        sort_by_rank(&mut words);
        Ok(words)
    }

    fn reset(&self) -> Result<(), StorageError> {
        self.books.clear();
        tracing::info!("In-memory frequency store was reset");
        Ok(())
    }
}

fn records<'a>(
    book: &'a str,
    frequencies: &'a WordFrequencies,
) -> impl Iterator<Item = FrequencyRecord> + 'a {
    frequencies.iter().map(move |(word, &count)| FrequencyRecord {
        book: book.to_string(),
        word: word.clone(),
        frequency: count,
    })
}
