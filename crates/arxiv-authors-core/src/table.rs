//! In-memory paper table over Arrow record batches

use arrow::array::{Array, ArrayRef, AsArray, RecordBatch};
use arrow::datatypes::SchemaRef;

use crate::author::Author;
use crate::error::AuthorError;
use crate::schema::is_author_list;

/// A paper table: one schema, zero or more batches, one row per paper.
#[derive(Debug, Clone)]
pub struct PaperTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl PaperTable {
    /// Build from batches; every batch must carry the fields of `schema`.
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self, AuthorError> {
        if let Some(batch) = batches
            .iter()
            .find(|b| b.schema().fields() != schema.fields())
        {
            return Err(AuthorError::Arrow(arrow::error::ArrowError::SchemaError(
                format!(
                    "batch schema {:?} does not match table schema",
                    batch.schema()
                ),
            )));
        }
        Ok(Self { schema, batches })
    }

    pub fn from_batch(batch: RecordBatch) -> Self {
        Self {
            schema: batch.schema(),
            batches: vec![batch],
        }
    }

    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            schema,
            batches: Vec::new(),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Author-list column `name`, one chunk per batch.
    ///
    /// Fails on a missing column or one that is not a list of string lists
    /// (`List` or `LargeList`, `Utf8` or `LargeUtf8`), even when the table
    /// has no rows.
    pub fn author_column(&self, name: &str) -> Result<Vec<AuthorColumn<'_>>, AuthorError> {
        let idx = self
            .schema
            .index_of(name)
            .map_err(|_| AuthorError::MissingColumn {
                column: name.to_string(),
            })?;
        let data_type = self.schema.field(idx).data_type();
        if !is_author_list(data_type) {
            return Err(AuthorError::ColumnType {
                column: name.to_string(),
                found: data_type.clone(),
            });
        }
        Ok(self
            .batches
            .iter()
            .map(|batch| AuthorColumn {
                lists: batch.column(idx).as_ref(),
            })
            .collect())
    }
}

/// One batch worth of an author-list column.
#[derive(Debug, Clone, Copy)]
pub struct AuthorColumn<'a> {
    lists: &'a dyn Array,
}

/// Element `i` of a `List` or `LargeList` array.
fn list_value(array: &dyn Array, i: usize) -> Option<ArrayRef> {
    match array.as_list_opt::<i32>() {
        Some(list) => Some(list.value(i)),
        None => array.as_list_opt::<i64>().map(|list| list.value(i)),
    }
}

/// One author record from its name parts; null parts read as "".
fn author_record(parts: &dyn Array) -> Author {
    if let Some(parts) = parts.as_string_opt::<i32>() {
        Author::from_parts(parts.iter().map(Option::unwrap_or_default))
    } else if let Some(parts) = parts.as_string_opt::<i64>() {
        Author::from_parts(parts.iter().map(Option::unwrap_or_default))
    } else {
        Author::default()
    }
}

impl<'a> AuthorColumn<'a> {
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Authors of one paper, in listed order. A null cell has no authors;
    /// null records are skipped and null name parts read as empty.
    pub fn authors(&self, row: usize) -> Vec<Author> {
        if self.lists.is_null(row) {
            return Vec::new();
        }
        let Some(records) = list_value(self.lists, row) else {
            return Vec::new();
        };
        (0..records.len())
            .filter(|&i| records.is_valid(i))
            .filter_map(|i| list_value(records.as_ref(), i))
            .map(|parts| author_record(parts.as_ref()))
            .collect()
    }

    /// Per-paper author lists for every row of the chunk.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Author>> + 'a {
        let column = *self;
        (0..column.len()).map(move |row| column.authors(row))
    }
}
