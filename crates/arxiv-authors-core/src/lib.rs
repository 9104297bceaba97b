//! arxiv-authors core - unique-author extraction for arXiv paper tables
//!
//! Loads the arXiv metadata snapshot (JSON Lines or Parquet) into Arrow
//! record batches, flattens the `authors_parsed` column, and counts the
//! distinct authors.

pub mod accumulator;
pub mod author;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod progress;
pub mod reader;
pub mod schema;
pub mod sink;
pub mod stats;
pub mod table;
pub mod transform;
pub mod unique;

// Re-exports for convenience
pub use author::Author;
pub use error::AuthorError;
pub use flatten::{flatten, unique};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
pub use reader::{InputFormat, LoadStats, ReadOptions, expand_inputs, load_table};
pub use schema::AUTHORS_PARSED;
pub use sink::{ParquetSink, write_authors};
pub use stats::{AuthorSummary, format_top_authors};
pub use table::{AuthorColumn, PaperTable};
pub use unique::{
    AuthorCounts, author_mentions, count_authors, count_authors_in, get_unique_authors, top_authors,
    unique_authors_in,
};
