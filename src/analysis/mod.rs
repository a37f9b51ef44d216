//! Text Analysis Module
//!
//! Turns a fetched document into word counts.
//!
//! ## Stages
//! 1. **Scan**: A markup-aware pull reader walks the document and reports only
//!    the text segments a reader would see. Tag names, attributes, comments and
//!    the bodies of `<script>`/`<style>` never reach the next stage. A `<` or `&`
//!    that cannot start markup is read as text, the way a browser would.
//! 2. **Extract**: Each segment is split into `\b\w+\b` word runs, in document order.
//! 3. **Aggregate**: Tokens are folded into a `word -> count` map.
//!
//! ## Submodules
//! - **`tokenizer`**: Segment scanning and token extraction.
//! - **`frequency`**: Token aggregation.

pub mod frequency;
pub mod tokenizer;
