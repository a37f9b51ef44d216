//! Pipeline Result Types
//!
//! What the ingestion and lookup pipelines hand back to their caller. The three
//! variants of [`PipelineOutcome`] are the whole observable surface: ranked
//! words, an unknown title, or a failure message.

use crate::error::PipelineError;
use crate::lookup::pipeline::top_k;
use crate::storage::types::WordCount;
use serde::{Deserialize, Serialize};

/// Display count used when the caller does not supply one.
pub const DEFAULT_DISPLAY_COUNT: usize = 10;

/// Lowest count a word needs to appear in a ranked result.
pub const DEFAULT_MIN_FREQUENCY: u32 = 1;

/// A word in rank order, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWord {
    pub rank: usize,
    pub word: String,
    pub count: u32,
}

impl RankedWord {
    /// One line of the classic listing, e.g. `1) the: 42`.
    pub fn display_line(&self) -> String {
        format!("{}) {}: {}", self.rank, self.word, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// The top of the book's ranking. `total_words` is the length of the full
    /// ranking before truncation to the display count.
    Ranked {
        book: String,
        total_words: usize,
        words: Vec<RankedWord>,
    },
    /// The title has no records; it can be ingested from a source URL.
    NotFound { book: String },
    /// A fetch or storage failure stopped the pipeline.
    Failed {
        book: String,
        kind: FailureKind,
        message: String,
    },
}

/// Coarse class of a failure, for callers that map outcomes to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Storage,
    AlreadyIngested,
    /// The worker running the pipeline died before producing an outcome.
    Internal,
}

impl PipelineOutcome {
    /// Numbers the first `display_count` entries of a rank-ordered sequence.
    pub fn ranked(book: &str, ranking: Vec<WordCount>, display_count: usize) -> Self {
        let total_words = ranking.len();
        let words = top_k(ranking, display_count)
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedWord {
                rank: i + 1,
                word: entry.word,
                count: entry.count,
            })
            .collect();

        PipelineOutcome::Ranked {
            book: book.to_string(),
            total_words,
            words,
        }
    }

    pub fn failed(book: &str, error: &PipelineError) -> Self {
        let kind = match error {
            PipelineError::Fetch(_) => FailureKind::Fetch,
            PipelineError::Storage(_) => FailureKind::Storage,
            PipelineError::AlreadyIngested(_) => FailureKind::AlreadyIngested,
        };

        PipelineOutcome::Failed {
            book: book.to_string(),
            kind,
            message: error.to_string(),
        }
    }
}

/// Normalizes a user-supplied title into the store key.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
