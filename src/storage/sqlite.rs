use super::types::{FrequencyStore, WordCount};
use crate::analysis::frequency::WordFrequencies;
use crate::error::StorageError;

use rusqlite::{Connection, Transaction, TransactionBehavior, params};
use std::path::{Path, PathBuf};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS ebooks (book TEXT, word TEXT, frequency INTEGER)";
const DROP_TABLE: &str = "DROP TABLE IF EXISTS ebooks";
const INSERT_ROW: &str = "INSERT INTO ebooks (book, word, frequency) VALUES (?1, ?2, ?3)";
const EXISTS_BOOK: &str = "SELECT EXISTS (SELECT 1 FROM ebooks WHERE book = ?1)";
const RANKED_WORDS: &str = "SELECT word, frequency FROM ebooks \
     WHERE book = ?1 AND frequency >= ?2 \
     ORDER BY frequency DESC, word ASC";

/// Frequency store backed by a single SQLite file.
///
/// No connection is held between calls: each operation opens its own and the
/// connection is closed when it goes out of scope, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteFrequencyStore {
    path: PathBuf,
}

impl SqliteFrequencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }
}

impl FrequencyStore for SqliteFrequencyStore {
    fn initialize(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute(CREATE_TABLE, [])?;
        tracing::debug!("Initialized frequency table in {}", self.path.display());
        Ok(())
    }

    fn insert(&self, book: &str, frequencies: &WordFrequencies) -> Result<usize, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let (inserted, failure) = insert_rows(&tx, book, frequencies)?;

        // Rows that made it in are kept even when the batch stopped early.
        tx.commit()?;
        finish_insert(book, inserted, failure)
    }

    fn insert_if_absent(
        &self,
        book: &str,
        frequencies: &WordFrequencies,
    ) -> Result<Option<usize>, StorageError> {
        let mut conn = self.connect()?;
        // IMMEDIATE takes the write lock before the existence check.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let found: bool = tx.query_row(EXISTS_BOOK, params![book], |row| row.get(0))?;
        if found {
            tracing::debug!("Rows for '{}' already present, nothing inserted", book);
            return Ok(None);
        }

        let (inserted, failure) = insert_rows(&tx, book, frequencies)?;
        tx.commit()?;
        finish_insert(book, inserted, failure).map(Some)
    }

    fn exists(&self, book: &str) -> Result<bool, StorageError> {
        let conn = self.connect()?;
        let found = conn.query_row(EXISTS_BOOK, params![book], |row| row.get(0))?;
        Ok(found)
    }

    fn query(&self, book: &str, min_frequency: u32) -> Result<Vec<WordCount>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(RANKED_WORDS)?;
        let rows = stmt.query_map(params![book, min_frequency], |row| {
            Ok(WordCount {
                word: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let words = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Query for '{}' returned {} words", book, words.len());
        Ok(words)
    }

    fn reset(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute(DROP_TABLE, [])?;
        conn.execute(CREATE_TABLE, [])?;
        tracing::info!("Frequency store at {} was reset", self.path.display());
        Ok(())
    }
}

/// Writes rows until the first failure, returning the count and that failure.
fn insert_rows(
    tx: &Transaction<'_>,
    book: &str,
    frequencies: &WordFrequencies,
) -> Result<(usize, Option<rusqlite::Error>), StorageError> {
    let mut stmt = tx.prepare(INSERT_ROW)?;
    let mut inserted = 0usize;

    for (word, count) in frequencies {
        if let Err(err) = stmt.execute(params![book, word, count]) {
            tracing::error!("Failed to insert '{}' for '{}': {}", word, book, err);
            return Ok((inserted, Some(err)));
        }
        inserted += 1;
    }

    Ok((inserted, None))
}

fn finish_insert(
    book: &str,
    inserted: usize,
    failure: Option<rusqlite::Error>,
) -> Result<usize, StorageError> {
    match failure {
        Some(source) => Err(StorageError::PartialInsert {
            book: book.to_string(),
            inserted,
            source,
        }),
        None => {
            tracing::debug!("Inserted {} rows for '{}'", inserted, book);
            Ok(inserted)
        }
    }
}
