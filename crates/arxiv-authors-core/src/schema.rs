//! Arrow schema definitions
//!
//! Each table has a schema function returning a static Arc<Schema>.

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema};

/// Name of the author-parsed column in arXiv metadata
pub const AUTHORS_PARSED: &str = "authors_parsed";

/// `List<List<Utf8>>`: per paper, a list of `[last, first, suffix, ...]` records.
///
/// Item fields use the `ListBuilder` defaults (`"item"`, nullable) so built
/// arrays match the schema exactly.
pub fn author_list_type() -> DataType {
    let part = Field::new("item", DataType::Utf8, true);
    let record = Field::new("item", DataType::List(Arc::new(part)), true);
    DataType::List(Arc::new(record))
}

/// Whether `data_type` is an author-list column. 64-bit offsets
/// (`LargeList`, `LargeUtf8`) are accepted at every level.
pub fn is_author_list(data_type: &DataType) -> bool {
    match data_type {
        DataType::List(record) | DataType::LargeList(record) => match record.data_type() {
            DataType::List(part) | DataType::LargeList(part) => {
                matches!(part.data_type(), DataType::Utf8 | DataType::LargeUtf8)
            }
            _ => false,
        },
        _ => false,
    }
}

/// papers table — one row per arXiv paper
pub fn papers() -> &'static Arc<Schema> {
    static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false), // e.g., "0704.0001"
            Field::new("title", DataType::Utf8, true),
            Field::new("categories", DataType::Utf8, true), // space-separated, "hep-ph math.CO"
            Field::new("update_date", DataType::Utf8, true), // ISO 8601
            Field::new(AUTHORS_PARSED, author_list_type(), true),
        ]))
    });
    &SCHEMA
}

/// authors.parquet — one row per unique author
pub fn authors() -> &'static Arc<Schema> {
    static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
        Arc::new(Schema::new(vec![
            Field::new("last_name", DataType::Utf8, false),
            Field::new("first_name", DataType::Utf8, false),
            Field::new("suffix", DataType::Utf8, false),
            Field::new("mentions", DataType::UInt64, false), // author mentions
        ]))
    });
    &SCHEMA
}
