use super::fetch::{Fetcher, decode_document};
use crate::analysis::frequency::count_frequencies;
use crate::analysis::tokenizer::tokenize_document;
use crate::error::PipelineError;
use crate::storage::types::{FrequencyStore, WordCount};
use crate::types::{DEFAULT_MIN_FREQUENCY, PipelineOutcome};

/// Fetches, counts and stores a new book, then returns its top `display_count` words.
///
/// `book` must already be normalized. A title that is already stored is rejected
/// before anything is fetched. The write itself goes through
/// [`FrequencyStore::insert_if_absent`], so two concurrent runs for one title
/// cannot both store it: the later one fails with `AlreadyIngested`.
pub fn ingest_book(
    store: &dyn FrequencyStore,
    fetcher: &dyn Fetcher,
    book: &str,
    locator: &str,
    display_count: usize,
) -> PipelineOutcome {
    match run_ingestion(store, fetcher, book, locator) {
        Ok(ranking) => {
            tracing::info!("Ingested '{}' with {} distinct words", book, ranking.len());
            PipelineOutcome::ranked(book, ranking, display_count)
        }
        Err(err) => {
            tracing::error!("Ingestion of '{}' from {} failed: {}", book, locator, err);
            PipelineOutcome::failed(book, &err)
        }
    }
}

fn run_ingestion(
    store: &dyn FrequencyStore,
    fetcher: &dyn Fetcher,
    book: &str,
    locator: &str,
) -> Result<Vec<WordCount>, PipelineError> {
    if store.exists(book)? {
        return Err(PipelineError::AlreadyIngested(book.to_string()));
    }

    let bytes = fetcher.fetch(locator)?;
    let document = decode_document(locator, bytes)?;

    let tokens = tokenize_document(&document);
    let frequencies = count_frequencies(&tokens);
    tracing::debug!(
        "'{}': {} tokens, {} distinct words",
        book,
        tokens.len(),
        frequencies.len()
    );

    if store.insert_if_absent(book, &frequencies)?.is_none() {
        return Err(PipelineError::AlreadyIngested(book.to_string()));
    }

    Ok(store.query(book, DEFAULT_MIN_FREQUENCY)?)
}
