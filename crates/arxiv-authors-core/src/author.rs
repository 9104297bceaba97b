//! Author record as stored in the arXiv `authors_parsed` column

use std::fmt;

/// One parsed author: `[last, first, suffix, ...]` from the snapshot.
///
/// Equality and hashing are plain value equality on the three name parts.
/// Two spellings of the same person are two authors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Author {
    pub last: String,
    pub first: String,
    pub suffix: String,
}

impl Author {
    pub fn new(last: impl Into<String>, first: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
            suffix: suffix.into(),
        }
    }

    /// Build from the raw string parts of one author record.
    ///
    /// Missing trailing parts become empty strings; parts past the suffix
    /// (affiliations in some snapshot rows) are dropped.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parts = parts.into_iter();
        let mut next = || parts.next().unwrap_or_default().to_string();
        let last = next();
        let first = next();
        let suffix = next();
        Self {
            last,
            first,
            suffix,
        }
    }
}

/// Renders as "Last, First Suffix" with empty parts omitted.
impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.last)?;
        if !self.first.is_empty() {
            write!(f, ", {}", self.first)?;
        }
        if !self.suffix.is_empty() {
            write!(f, " {}", self.suffix)?;
        }
        Ok(())
    }
}
