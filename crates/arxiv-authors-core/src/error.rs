//! Error type for loading paper tables and extracting authors

use std::path::PathBuf;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Error from reading a paper table or walking its author column.
#[derive(Debug)]
pub enum AuthorError {
    /// Table has no column with this name
    MissingColumn { column: String },
    /// Column exists but is not `List<List<Utf8>>`
    ColumnType { column: String, found: DataType },
    /// Input file schema differs from the first loaded file
    SchemaMismatch { path: PathBuf },
    /// Input pattern matched no files
    NoInput { pattern: String },
    /// Invalid glob pattern
    Pattern(glob::PatternError),
    /// Malformed JSON line (1-based line number)
    Json {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    Arrow(ArrowError),
    Parquet(ParquetError),
    Io(std::io::Error),
}

impl std::fmt::Display for AuthorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn { column } => write!(f, "no column named '{column}'"),
            Self::ColumnType { column, found } => {
                write!(f, "column '{column}' is {found}, expected List<List<Utf8>>")
            }
            Self::SchemaMismatch { path } => {
                write!(f, "schema of {} differs from earlier inputs", path.display())
            }
            Self::NoInput { pattern } => write!(f, "no input files match '{pattern}'"),
            Self::Pattern(e) => write!(f, "invalid input pattern: {e}"),
            Self::Json { path, line, source } => {
                write!(f, "{}:{line}: {source}", path.display())
            }
            Self::Arrow(e) => write!(f, "Arrow: {e}"),
            Self::Parquet(e) => write!(f, "Parquet: {e}"),
            Self::Io(e) => write!(f, "IO: {e}"),
        }
    }
}

impl std::error::Error for AuthorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::Json { source, .. } => Some(source),
            Self::Arrow(e) => Some(e),
            Self::Parquet(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArrowError> for AuthorError {
    fn from(e: ArrowError) -> Self {
        Self::Arrow(e)
    }
}

impl From<ParquetError> for AuthorError {
    fn from(e: ParquetError) -> Self {
        Self::Parquet(e)
    }
}

impl From<std::io::Error> for AuthorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<glob::PatternError> for AuthorError {
    fn from(e: glob::PatternError) -> Self {
        Self::Pattern(e)
    }
}
