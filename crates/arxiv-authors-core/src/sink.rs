//! Parquet output sink and author export

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;

use crate::accumulator::Accumulator;
use crate::error::AuthorError;
use crate::transform::AuthorAccumulator;
use crate::unique::{AuthorCounts, top_authors};

/// Buffered parquet writer with atomic tmp→rename
pub struct ParquetSink {
    writer: ArrowWriter<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for ParquetSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl ParquetSink {
    /// Create a sink for `{name}.parquet`, writing to a temporary file first
    pub fn new(
        name: &str,
        output_dir: &Path,
        schema: &Schema,
        zstd_level: i32,
    ) -> Result<Self, AuthorError> {
        let filename = format!("{name}.parquet");
        let final_path = output_dir.join(&filename);
        let tmp_path = output_dir.join(format!("{filename}.tmp"));

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        let level = ZstdLevel::try_new(zstd_level)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(level))
            .set_max_row_group_size(1024 * 1024) // 1M rows per row group
            .build();

        let writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

        Ok(Self {
            writer,
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    /// Write a record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), AuthorError> {
        self.row_count += batch.num_rows();
        Ok(self.writer.write(batch)?)
    }

    /// Finalize: flush footer and atomically rename tmp → final
    pub fn finalize(self) -> Result<(PathBuf, usize), AuthorError> {
        self.writer.close()?;
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok((self.final_path, self.row_count))
    }
}

/// Write `authors.parquet`: one row per unique author, most-mentioned first.
///
/// Returns the written path and row count.
pub fn write_authors(
    mentions: &AuthorCounts,
    output_dir: &Path,
    zstd_level: i32,
) -> Result<(PathBuf, usize), AuthorError> {
    fs::create_dir_all(output_dir)?;
    let mut sink = ParquetSink::new(
        "authors",
        output_dir,
        crate::schema::authors(),
        zstd_level,
    )?;

    let mut acc = AuthorAccumulator::new();
    for (author, n) in top_authors(mentions, mentions.len()) {
        acc.push((author.clone(), n as u64));
        if acc.is_full() {
            sink.write_batch(&acc.take_batch()?)?;
        }
    }
    if !acc.is_empty() {
        sink.write_batch(&acc.take_batch()?)?;
    }

    sink.finalize()
}
