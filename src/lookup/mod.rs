//! Lookup Service Module
//!
//! Query-only path for books that are already in the frequency store.
//!
//! ## Workflow
//! 1. **Check**: An unknown title ends with a "not found" outcome, distinct from a
//!    book that was ingested but produced no words.
//! 2. **Query**: The full ranking is read back in rank order.
//! 3. **Truncate**: The first `k` entries are numbered and returned.

pub mod handlers;
pub mod pipeline;
