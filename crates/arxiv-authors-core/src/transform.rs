//! Row structs and JSON-to-Arrow accumulators
//!
//! `PaperRow` mirrors one line of the arXiv metadata snapshot; only the
//! fields kept in `schema::papers` are deserialized.

use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::Schema;
use arrow::error::ArrowError;
use serde::{Deserialize, Deserializer};

pub use crate::accumulator::Accumulator;
use crate::author::Author;
use crate::schema;

/// Treat JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// === Row struct (deserialized from JSON) ===

/// arXiv snapshot record
#[derive(Debug, Default, Deserialize)]
pub struct PaperRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub categories: Option<String>,

    #[serde(default)]
    pub update_date: Option<String>,

    /// `[[last, first, suffix, ...], ...]`
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors_parsed: Vec<Vec<Option<String>>>,
}

// === Paper accumulator ===

pub struct PaperAccumulator {
    schema: Arc<Schema>,
    id: Vec<String>,
    title: Vec<Option<String>>,
    categories: Vec<Option<String>>,
    update_date: Vec<Option<String>>,
    authors_parsed: Vec<Vec<Vec<Option<String>>>>,
}

impl PaperAccumulator {
    pub fn new() -> Self {
        Self {
            schema: schema::papers().clone(),
            id: Vec::new(),
            title: Vec::new(),
            categories: Vec::new(),
            update_date: Vec::new(),
            authors_parsed: Vec::new(),
        }
    }
}

impl Default for PaperAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for PaperAccumulator {
    type Row = PaperRow;

    fn push(&mut self, row: PaperRow) {
        self.id.push(row.id);
        self.title.push(row.title);
        self.categories.push(row.categories);
        self.update_date.push(row.update_date);
        self.authors_parsed.push(row.authors_parsed);
    }

    fn len(&self) -> usize {
        self.id.len()
    }

    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
        let mut authors = ListBuilder::new(ListBuilder::new(StringBuilder::new()));
        for paper in self.authors_parsed.drain(..) {
            for record in paper {
                let parts = authors.values();
                for part in record {
                    parts.values().append_option(part);
                }
                parts.append(true);
            }
            authors.append(true);
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(std::mem::take(&mut self.id))),
            Arc::new(StringArray::from(std::mem::take(&mut self.title))),
            Arc::new(StringArray::from(std::mem::take(&mut self.categories))),
            Arc::new(StringArray::from(std::mem::take(&mut self.update_date))),
            Arc::new(authors.finish()),
        ];
        RecordBatch::try_new(self.schema.clone(), columns)
    }
}

// === Author accumulator ===

/// Builds `authors.parquet` rows: one unique author with its mention count.
pub struct AuthorAccumulator {
    schema: Arc<Schema>,
    last_name: Vec<String>,
    first_name: Vec<String>,
    suffix: Vec<String>,
    mentions: Vec<u64>,
}

impl AuthorAccumulator {
    pub fn new() -> Self {
        Self {
            schema: schema::authors().clone(),
            last_name: Vec::new(),
            first_name: Vec::new(),
            suffix: Vec::new(),
            mentions: Vec::new(),
        }
    }
}

impl Default for AuthorAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for AuthorAccumulator {
    type Row = (Author, u64);

    fn push(&mut self, (author, mentions): (Author, u64)) {
        self.last_name.push(author.last);
        self.first_name.push(author.first);
        self.suffix.push(author.suffix);
        self.mentions.push(mentions);
    }

    fn len(&self) -> usize {
        self.last_name.len()
    }

    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(std::mem::take(&mut self.last_name))),
            Arc::new(StringArray::from(std::mem::take(&mut self.first_name))),
            Arc::new(StringArray::from(std::mem::take(&mut self.suffix))),
            Arc::new(UInt64Array::from(std::mem::take(&mut self.mentions))),
        ];
        RecordBatch::try_new(self.schema.clone(), columns)
    }
}
