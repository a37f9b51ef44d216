//! Ingestion Service Module
//!
//! Adds a new book to the frequency store.
//!
//! ## Workflow
//! 1. **Guard**: A title that already has records is rejected; nothing is fetched.
//! 2. **Download**: The fetch collaborator returns the raw document.
//! 3. **Decode**: Bytes are decoded as UTF-8 and lowercased.
//! 4. **Analyze**: The document is tokenized and aggregated into word counts.
//! 5. **Persist**: Counts are inserted under the title.
//! 6. **Report**: The fresh ranking is queried back and truncated for display.
//!
//! A failed download ends the run before anything is tokenized or stored.

pub mod fetch;
pub mod handlers;
pub mod pipeline;
pub mod types;
