//! Batch accumulator trait and generic line processor for JSON Lines inputs

use std::io::BufRead;

use arrow::array::RecordBatch;
use arrow::error::ArrowError;
use indicatif::ProgressBar;

use crate::error::AuthorError;
use crate::progress::fmt_num;

/// Default batch size for flushing accumulated rows into a `RecordBatch`.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Accumulator trait for batch processing of parsed rows into Arrow `RecordBatch`.
pub trait Accumulator {
    type Row;

    /// Push a row into the accumulator
    fn push(&mut self, row: Self::Row);

    /// Number of rows currently buffered
    fn len(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if buffer is full and should be flushed
    fn is_full(&self) -> bool {
        self.len() >= DEFAULT_BATCH_SIZE
    }

    /// Take buffered rows as a RecordBatch, resetting internal state
    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError>;
}

/// Statistics from processing input lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines_scanned: usize,
    pub rows_written: usize,
}

/// Initial capacity for per-line JSON read buffer
const LINE_BUF_CAPACITY: usize = 4096;

/// Progress update interval (every N lines to avoid overhead)
const UPDATE_INTERVAL: usize = 10_000;

/// Read lines, parse each, push to accumulator, flush full batches.
///
/// `parse` gets the 1-based line number and the raw line bytes (not yet
/// UTF-8 checked); `Ok(None)` drops the line. Blank lines are not passed to
/// `parse`. Stops early once `max_rows` rows were kept.
pub fn process_lines<A: Accumulator, R: BufRead>(
    reader: &mut R,
    acc: &mut A,
    mut write_batch: impl FnMut(RecordBatch) -> Result<(), AuthorError>,
    mut parse: impl FnMut(usize, &[u8]) -> Result<Option<A::Row>, AuthorError>,
    max_rows: Option<usize>,
    pb: &ProgressBar,
) -> Result<LineStats, AuthorError> {
    let mut buf = Vec::with_capacity(LINE_BUF_CAPACITY);
    let mut stats = LineStats::default();

    while max_rows.is_none_or(|max| stats.rows_written < max) {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_scanned += 1;

        if stats.lines_scanned.is_multiple_of(UPDATE_INTERVAL) {
            pb.set_message(format!("{} papers", fmt_num(stats.rows_written)));
        }

        let line = buf.trim_ascii_end();
        if line.is_empty() {
            continue;
        }
        if let Some(row) = parse(stats.lines_scanned, line)? {
            acc.push(row);
            stats.rows_written += 1;
            if acc.is_full() {
                write_batch(acc.take_batch()?)?;
            }
        }
    }
    if !acc.is_empty() {
        write_batch(acc.take_batch()?)?;
    }
    Ok(stats)
}
