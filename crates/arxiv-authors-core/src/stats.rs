//! Author statistics and summary tables

use std::time::Duration;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::author::Author;
use crate::progress::fmt_num;
use crate::reader::LoadStats;
use crate::unique::AuthorCounts;

/// Aggregated counts for one loaded table.
#[derive(Debug, Clone, Default)]
pub struct AuthorSummary {
    pub files: usize,
    pub papers: usize,
    /// Lines skipped as malformed JSON
    pub parse_errors: usize,
    /// Author occurrences across all papers (flattened length)
    pub mentions: usize,
    pub unique_authors: usize,
    pub elapsed: Duration,
}

impl AuthorSummary {
    pub fn new(load: &LoadStats, mentions: &AuthorCounts, elapsed: Duration) -> Self {
        Self {
            files: load.files,
            papers: load.rows,
            parse_errors: load.parse_errors,
            mentions: mentions.values().sum(),
            unique_authors: mentions.len(),
            elapsed,
        }
    }

    /// Average mentions per unique author.
    pub fn mentions_per_author(&self) -> f64 {
        if self.unique_authors > 0 {
            self.mentions as f64 / self.unique_authors as f64
        } else {
            0.0
        }
    }

    /// Log summary (non-TTY mode).
    pub fn log(&self) {
        log::info!(
            "{} unique authors, {} mentions in {} papers [{:.1}s]",
            fmt_num(self.unique_authors),
            fmt_num(self.mentions),
            fmt_num(self.papers),
            self.elapsed.as_secs_f64()
        );
    }

    /// Format summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Authors")
                    .fg(Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan),
            ]);

        table.add_row(vec![Cell::new("Files"), Cell::new(fmt_num(self.files))]);
        table.add_row(vec![Cell::new("Papers"), Cell::new(fmt_num(self.papers))]);
        if self.parse_errors > 0 {
            table.add_row(vec![
                Cell::new("Parse errors"),
                Cell::new(fmt_num(self.parse_errors)).fg(Color::Yellow),
            ]);
        }
        table.add_row(vec![
            Cell::new("Author mentions"),
            Cell::new(fmt_num(self.mentions)),
        ]);
        table.add_row(vec![
            Cell::new("Unique authors").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(fmt_num(self.unique_authors)).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("Mentions / author"),
            Cell::new(format!("{:.2}", self.mentions_per_author())),
        ]);
        table.add_row(vec![
            Cell::new("Elapsed"),
            Cell::new(format!("{:.1}s", self.elapsed.as_secs_f64())),
        ]);

        table.to_string()
    }
}

/// Ranked author table: rank, name, mentions.
pub fn format_top_authors(top: &[(&Author, usize)]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Author").fg(Color::Cyan),
            Cell::new("Mentions").fg(Color::Cyan),
        ]);
    for (rank, (author, mentions)) in top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(author),
            Cell::new(fmt_num(*mentions)),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions() -> AuthorCounts {
        let mut m = AuthorCounts::default();
        m.insert(Author::new("Berger", "E. L.", ""), 3);
        m.insert(Author::new("Balázs", "C.", ""), 1);
        m
    }

    #[test]
    fn summary_from_mentions() {
        let load = LoadStats {
            files: 1,
            lines_scanned: 3,
            parse_errors: 0,
            rows: 3,
        };
        let s = AuthorSummary::new(&load, &mentions(), Duration::from_secs(1));
        assert_eq!(s.papers, 3);
        assert_eq!(s.mentions, 4);
        assert_eq!(s.unique_authors, 2);
        assert!((s.mentions_per_author() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mentions_per_author_empty() {
        assert_eq!(AuthorSummary::default().mentions_per_author(), 0.0);
    }

    #[test]
    fn table_shows_unique_count() {
        let s = AuthorSummary {
            unique_authors: 1_234,
            ..Default::default()
        };
        let out = s.format_table();
        assert!(out.contains("Unique authors"));
        assert!(out.contains("1,234"));
        assert!(!out.contains("Parse errors"));
    }

    #[test]
    fn top_table_lists_names() {
        let m = mentions();
        let top = crate::unique::top_authors(&m, 2);
        let out = format_top_authors(&top);
        assert!(out.contains("Berger, E. L."));
        assert!(out.contains("Balázs, C."));
    }
}
