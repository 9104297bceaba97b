//! Load paper tables from arXiv JSON Lines snapshots and Parquet files

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatchReader;
use flate2::read::MultiGzDecoder;
use indicatif::ProgressBar;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::accumulator::{DEFAULT_BATCH_SIZE, LineStats, process_lines};
use crate::error::AuthorError;
use crate::progress::{ProgressContext, fmt_num};
use crate::table::PaperTable;
use crate::transform::{PaperAccumulator, PaperRow};

/// Read buffer for (possibly gzipped) snapshot files
const READ_BUF_CAPACITY: usize = 256 * 1024;

/// Options shared by all input formats
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Stop after this many papers across all inputs
    pub max_rows: Option<usize>,
    /// Skip malformed JSON lines instead of failing
    pub skip_invalid: bool,
    /// Keep just this column (Parquet projects it on read)
    pub column: Option<String>,
}

/// Input file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    JsonLines { gzip: bool },
    Parquet,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("parquet") => Self::Parquet,
            Some("gz") => Self::JsonLines { gzip: true },
            _ => Self::JsonLines { gzip: false },
        }
    }
}

/// Counters from loading one or more inputs
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub files: usize,
    pub lines_scanned: usize,
    pub parse_errors: usize,
    pub rows: usize,
}

/// Expand glob patterns into input paths, in pattern order.
///
/// A pattern without matches is an error so typos do not read as empty tables.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>, AuthorError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        if matched.is_empty() {
            return Err(AuthorError::NoInput {
                pattern: pattern.clone(),
            });
        }
        matched.sort();
        paths.append(&mut matched);
    }
    Ok(paths)
}

/// Open a snapshot file, transparently decompressing `.gz`.
fn open_lines(path: &Path, gzip: bool) -> Result<Box<dyn BufRead>, AuthorError> {
    let file = File::open(path)?;
    Ok(if gzip {
        Box::new(BufReader::with_capacity(
            READ_BUF_CAPACITY,
            MultiGzDecoder::new(file),
        ))
    } else {
        Box::new(BufReader::with_capacity(READ_BUF_CAPACITY, file))
    })
}

/// Read a JSON Lines snapshot into `papers` batches.
pub fn read_json_lines(
    path: &Path,
    gzip: bool,
    options: &ReadOptions,
    pb: &ProgressBar,
) -> Result<(Vec<RecordBatch>, LoadStats), AuthorError> {
    let mut reader = open_lines(path, gzip)?;
    let mut acc = PaperAccumulator::new();
    let mut batches = Vec::new();
    let mut parse_errors = 0usize;

    let LineStats {
        lines_scanned,
        rows_written,
    } = process_lines(
        &mut reader,
        &mut acc,
        |batch| {
            batches.push(batch);
            Ok(())
        },
        |line_no, line| match serde_json::from_slice::<PaperRow>(line) {
            Ok(row) => Ok(Some(row)),
            Err(e) if options.skip_invalid => {
                parse_errors += 1;
                log::warn!("{}:{line_no}: skipping malformed line: {e}", path.display());
                Ok(None)
            }
            Err(source) => Err(AuthorError::Json {
                path: path.to_path_buf(),
                line: line_no,
                source,
            }),
        },
        options.max_rows,
        pb,
    )?;

    Ok((
        batches,
        LoadStats {
            files: 1,
            lines_scanned,
            parse_errors,
            rows: rows_written,
        },
    ))
}

/// Read a Parquet file, optionally projected onto `options.column`.
pub fn read_parquet(
    path: &Path,
    options: &ReadOptions,
) -> Result<(SchemaRef, Vec<RecordBatch>), AuthorError> {
    let file = File::open(path)?;
    let mut builder =
        ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(DEFAULT_BATCH_SIZE);

    if let Some(column) = &options.column {
        if builder.schema().field_with_name(column).is_err() {
            return Err(AuthorError::MissingColumn {
                column: column.clone(),
            });
        }
        let mask = ProjectionMask::columns(builder.parquet_schema(), std::iter::once(column.as_str()));
        builder = builder.with_projection(mask);
    }
    if let Some(max) = options.max_rows {
        builder = builder.with_limit(max);
    }

    let reader = builder.build()?;
    let schema = reader.schema();
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Narrow JSON batches to the single column a projected Parquet read yields.
fn project_column(
    schema: &SchemaRef,
    batches: Vec<RecordBatch>,
    column: &str,
) -> Result<(SchemaRef, Vec<RecordBatch>), AuthorError> {
    let idx = schema
        .index_of(column)
        .map_err(|_| AuthorError::MissingColumn {
            column: column.to_string(),
        })?;
    let projected = Arc::new(schema.project(&[idx])?);
    let batches = batches
        .iter()
        .map(|batch| batch.project(&[idx]))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((projected, batches))
}

/// Load all inputs into one table. Every input must produce the same fields.
pub fn load_table(
    paths: &[PathBuf],
    options: &ReadOptions,
    progress: &ProgressContext,
) -> Result<(PaperTable, LoadStats), AuthorError> {
    let mut schema: Option<SchemaRef> = None;
    let mut batches = Vec::new();
    let mut stats = LoadStats::default();

    for path in paths {
        let remaining = options.max_rows.map(|max| max.saturating_sub(stats.rows));
        if remaining == Some(0) {
            log::debug!("Row limit reached, skipping {}", path.display());
            break;
        }
        let file_options = ReadOptions {
            max_rows: remaining,
            ..options.clone()
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pb = progress.stage_line(&name);
        pb.set_message("reading");
        let start = Instant::now();

        let (file_schema, mut file_batches, file_stats) = match InputFormat::detect(path) {
            InputFormat::Parquet => {
                let (file_schema, file_batches) = read_parquet(path, &file_options)?;
                let rows = file_batches.iter().map(RecordBatch::num_rows).sum();
                let file_stats = LoadStats {
                    files: 1,
                    rows,
                    ..Default::default()
                };
                (file_schema, file_batches, file_stats)
            }
            InputFormat::JsonLines { gzip } => {
                let (file_batches, file_stats) = read_json_lines(path, gzip, &file_options, &pb)?;
                let papers = crate::schema::papers();
                let (file_schema, file_batches) = match &options.column {
                    Some(column) => project_column(papers, file_batches, column)?,
                    None => (papers.clone(), file_batches),
                };
                (file_schema, file_batches, file_stats)
            }
        };
        pb.finish_and_clear();

        // Parquet carries its own schema metadata; only fields must agree.
        let first = schema.get_or_insert_with(|| file_schema.clone());
        if first.fields() != file_schema.fields() {
            return Err(AuthorError::SchemaMismatch { path: path.clone() });
        }

        log::info!(
            "{}: {} papers [{:.1}s]",
            path.display(),
            fmt_num(file_stats.rows),
            start.elapsed().as_secs_f64()
        );
        if file_stats.parse_errors > 0 {
            log::warn!(
                "{}: skipped {} malformed lines",
                path.display(),
                fmt_num(file_stats.parse_errors)
            );
        }

        stats.files += file_stats.files;
        stats.lines_scanned += file_stats.lines_scanned;
        stats.parse_errors += file_stats.parse_errors;
        stats.rows += file_stats.rows;
        batches.append(&mut file_batches);
    }

    let schema = schema.unwrap_or_else(|| crate::schema::papers().clone());
    Ok((PaperTable::new(schema, batches)?, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::TempDir;

    const LINES: &str = concat!(
        r#"{"id":"0704.0001","authors_parsed":[["Balázs","C.",""],["Berger","E. L.",""]]}"#,
        "\n",
        r#"{"id":"0704.0002","authors_parsed":[["Streinu","Ileana",""],["Theran","Louis",""]]}"#,
        "\n",
        r#"{"id":"0704.0003","authors_parsed":[["Berger","E. L.",""]]}"#,
        "\n",
    );

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn detect_format() {
        assert_eq!(
            InputFormat::detect(Path::new("a.parquet")),
            InputFormat::Parquet
        );
        assert_eq!(
            InputFormat::detect(Path::new("snapshot.json.gz")),
            InputFormat::JsonLines { gzip: true }
        );
        assert_eq!(
            InputFormat::detect(Path::new("snapshot.json")),
            InputFormat::JsonLines { gzip: false }
        );
    }

    #[test]
    fn load_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "snapshot.json", LINES);
        let ctx = ProgressContext::with_tty(false);

        let (table, stats) = load_table(&[path], &ReadOptions::default(), &ctx).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.lines_scanned, 3);
        assert_eq!(stats.parse_errors, 0);
    }

    #[test]
    fn load_gzip_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(LINES.as_bytes()).unwrap();
        enc.finish().unwrap();

        let ctx = ProgressContext::with_tty(false);
        let (table, _) = load_table(&[path], &ReadOptions::default(), &ctx).unwrap();
        assert_eq!(table.num_rows(), 3);
    }

    #[test]
    fn malformed_line_fails_by_default() {
        let dir = TempDir::new().unwrap();
        let content = format!("{LINES}{{not json\n");
        let path = write_file(dir.path(), "bad.json", &content);
        let ctx = ProgressContext::with_tty(false);

        let err = load_table(&[path], &ReadOptions::default(), &ctx).unwrap_err();
        assert!(matches!(err, AuthorError::Json { line: 4, .. }));
    }

    #[test]
    fn malformed_line_skipped_when_allowed() {
        let dir = TempDir::new().unwrap();
        let content = format!("{{not json\n{LINES}");
        let path = write_file(dir.path(), "bad.json", &content);
        let ctx = ProgressContext::with_tty(false);
        let options = ReadOptions {
            skip_invalid: true,
            ..Default::default()
        };

        let (table, stats) = load_table(&[path], &options, &ctx).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(stats.parse_errors, 1);
    }

    /// Valid line, a line with invalid UTF-8 in a string, valid line.
    fn invalid_utf8_lines() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(br#"{"id":"1","authors_parsed":[["Pan","Hongjun",""]]}"#);
        bytes.push(b'\n');
        bytes.extend_from_slice(b"{\"id\":\"2\",\"title\":\"\xff\xfe\"}\n");
        bytes.extend_from_slice(br#"{"id":"3","authors_parsed":[["Callan","David",""]]}"#);
        bytes.push(b'\n');
        bytes
    }

    #[test]
    fn invalid_utf8_line_fails_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, invalid_utf8_lines()).unwrap();
        let ctx = ProgressContext::with_tty(false);

        let err = load_table(&[path], &ReadOptions::default(), &ctx).unwrap_err();
        assert!(matches!(err, AuthorError::Json { line: 2, .. }));
    }

    #[test]
    fn invalid_utf8_line_skipped_when_allowed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, invalid_utf8_lines()).unwrap();
        let ctx = ProgressContext::with_tty(false);
        let options = ReadOptions {
            skip_invalid: true,
            ..Default::default()
        };

        let (table, stats) = load_table(&[path], &options, &ctx).unwrap();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.parse_errors, 1);
        assert_eq!(crate::unique::count_authors(&table).unwrap(), 2);
    }

    #[test]
    fn json_projected_onto_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "snapshot.json", LINES);
        let ctx = ProgressContext::with_tty(false);
        let options = ReadOptions {
            column: Some(crate::schema::AUTHORS_PARSED.to_string()),
            ..Default::default()
        };

        let (table, _) = load_table(&[path.clone()], &options, &ctx).unwrap();
        assert_eq!(table.schema().fields().len(), 1);
        assert_eq!(crate::unique::count_authors(&table).unwrap(), 4);

        let options = ReadOptions {
            column: Some("authors".to_string()),
            ..Default::default()
        };
        let err = load_table(&[path], &options, &ctx).unwrap_err();
        assert!(matches!(err, AuthorError::MissingColumn { .. }));
    }

    #[test]
    fn max_rows_spans_files() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.json", LINES);
        let b = write_file(dir.path(), "b.json", LINES);
        let ctx = ProgressContext::with_tty(false);
        let options = ReadOptions {
            max_rows: Some(4),
            ..Default::default()
        };

        let (table, stats) = load_table(&[a, b], &options, &ctx).unwrap();
        assert_eq!(table.num_rows(), 4);
        assert_eq!(stats.files, 2);
    }

    #[test]
    fn expand_inputs_sorted_glob() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "b.json", LINES);
        write_file(dir.path(), "a.json", LINES);
        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();

        let paths = expand_inputs(&[pattern]).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.json"));
    }

    #[test]
    fn expand_inputs_no_match() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.parquet").to_string_lossy().into_owned();
        let err = expand_inputs(&[pattern]).unwrap_err();
        assert!(matches!(err, AuthorError::NoInput { .. }));
    }

    #[test]
    fn no_inputs_is_empty_papers_table() {
        let ctx = ProgressContext::with_tty(false);
        let (table, stats) = load_table(&[], &ReadOptions::default(), &ctx).unwrap();
        assert!(table.is_empty());
        assert_eq!(stats.files, 0);
        assert_eq!(table.schema(), crate::schema::papers());
    }
}
