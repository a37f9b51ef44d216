use crate::error::PipelineError;
use crate::storage::types::{FrequencyStore, WordCount};
use crate::types::{DEFAULT_MIN_FREQUENCY, PipelineOutcome};

/// Looks up an already ingested book and returns its top `display_count` words.
///
/// An unknown title yields [`PipelineOutcome::NotFound`], which tells the caller
/// the book can be ingested instead. `book` must already be normalized.
pub fn lookup_book(store: &dyn FrequencyStore, book: &str, display_count: usize) -> PipelineOutcome {
    match run_lookup(store, book) {
        Ok(Some(ranking)) => PipelineOutcome::ranked(book, ranking, display_count),
        Ok(None) => {
            tracing::info!("'{}' not found in the database", book);
            PipelineOutcome::NotFound {
                book: book.to_string(),
            }
        }
        Err(err) => {
            tracing::error!("Lookup of '{}' failed: {}", book, err);
            PipelineOutcome::failed(book, &err)
        }
    }
}

fn run_lookup(store: &dyn FrequencyStore, book: &str) -> Result<Option<Vec<WordCount>>, PipelineError> {
    if !store.exists(book)? {
        return Ok(None);
    }

    Ok(Some(store.query(book, DEFAULT_MIN_FREQUENCY)?))
}

/// First `k` entries of a ranked sequence, or all of them when there are fewer.
pub fn top_k<T>(ranking: impl IntoIterator<Item = T>, k: usize) -> Vec<T> {
    ranking.into_iter().take(k).collect()
}
