//! Frequency Storage Module
//!
//! Persists `(book, word, frequency)` records and answers ranked queries over them.
//!
//! ## Core Concepts
//! - **Book identity**: The normalized title is the only key. There is no book table;
//!   the title is repeated on every word row of that book.
//! - **Rank order**: Count descending, ties broken by word ascending, so repeated
//!   queries always return the same sequence.
//! - **Uniqueness**: Nothing here rejects a second insert for the same title. Keeping
//!   `(book, word)` unique is the ingestion pipeline's job.
//!
//! ## Implementations
//! - **`sqlite`**: Durable store, one connection per operation.
//! - **`memory`**: `DashMap`-backed store for tests and throwaway runs.

pub mod memory;
pub mod sqlite;
pub mod types;

#[cfg(test)]
mod tests;
