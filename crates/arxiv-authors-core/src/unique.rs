//! Unique-author extraction over a paper table
//!
//! Each batch's author column is flattened and deduplicated on its own
//! (rayon), then the per-batch sets are merged. The result equals
//! `unique(flatten(all rows))`.

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::author::Author;
use crate::error::AuthorError;
use crate::flatten::{flatten, unique};
use crate::schema::AUTHORS_PARSED;
use crate::table::PaperTable;

/// Mention count per author.
pub type AuthorCounts = FxHashMap<Author, usize>;

/// Unique authors of the `authors_parsed` column.
pub fn get_unique_authors(table: &PaperTable) -> Result<FxHashSet<Author>, AuthorError> {
    unique_authors_in(table, AUTHORS_PARSED)
}

/// Unique authors of an arbitrary author-list column.
pub fn unique_authors_in(
    table: &PaperTable,
    column: &str,
) -> Result<FxHashSet<Author>, AuthorError> {
    let chunks = table.author_column(column)?;
    let authors = chunks
        .par_iter()
        .map(|chunk| unique(flatten(chunk.rows())))
        .reduce(FxHashSet::default, |mut acc, mut set| {
            if acc.len() < set.len() {
                std::mem::swap(&mut acc, &mut set);
            }
            acc.extend(set);
            acc
        });
    log::debug!(
        "{} unique authors in '{column}' over {} batches",
        authors.len(),
        chunks.len()
    );
    Ok(authors)
}

/// Number of unique authors in the `authors_parsed` column.
pub fn count_authors(table: &PaperTable) -> Result<usize, AuthorError> {
    count_authors_in(table, AUTHORS_PARSED)
}

pub fn count_authors_in(table: &PaperTable, column: &str) -> Result<usize, AuthorError> {
    Ok(unique_authors_in(table, column)?.len())
}

/// Mentions per author: how many times each author appears across all rows.
///
/// Keys are exactly the unique-author set; values sum to the flattened length.
pub fn author_mentions(table: &PaperTable, column: &str) -> Result<AuthorCounts, AuthorError> {
    let chunks = table.author_column(column)?;
    Ok(chunks
        .par_iter()
        .map(|chunk| {
            let mut counts = AuthorCounts::default();
            for author in flatten(chunk.rows()) {
                *counts.entry(author).or_default() += 1;
            }
            counts
        })
        .reduce(AuthorCounts::default, |mut acc, mut counts| {
            if acc.len() < counts.len() {
                std::mem::swap(&mut acc, &mut counts);
            }
            for (author, n) in counts {
                *acc.entry(author).or_default() += n;
            }
            acc
        }))
}

/// The `n` most-mentioned authors; ties ordered by (last, first, suffix).
pub fn top_authors(mentions: &AuthorCounts, n: usize) -> Vec<(&Author, usize)> {
    let mut ranked: Vec<_> = mentions.iter().map(|(a, &c)| (a, c)).collect();
    ranked.sort_unstable_by(|(a1, c1), (a2, c2)| c2.cmp(c1).then_with(|| a1.cmp(a2)));
    ranked.truncate(n);
    ranked
}
