//! Subcommands and the input options they share

pub mod count;
pub mod unique;

use std::time::Instant;

use anyhow::{Context, Result};
use arxiv_authors_core::{
    AuthorCounts, AuthorSummary, ProgressContext, ReadOptions, author_mentions, expand_inputs,
    load_table,
};
use clap::Args;

use crate::config::Config;

/// Input selection shared by `count` and `unique`
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Snapshot files or glob patterns (.json, .json.gz, .parquet)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Author-list column (default from config: "authors_parsed")
    #[arg(long)]
    pub column: Option<String>,

    /// Stop after this many papers
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Skip malformed JSON lines instead of failing
    #[arg(long)]
    pub skip_invalid: bool,
}

impl InputArgs {
    /// Merge CLI flags over config defaults
    fn read_options(&self, config: &Config) -> ReadOptions {
        ReadOptions {
            max_rows: self.max_rows,
            skip_invalid: self.skip_invalid || config.input.skip_invalid,
            column: Some(self.column(config).to_string()),
        }
    }

    fn column<'a>(&'a self, config: &'a Config) -> &'a str {
        self.column.as_deref().unwrap_or(&config.input.column)
    }
}

/// Load inputs and count mentions per author in the selected column.
fn load_mentions(
    args: &InputArgs,
    config: &Config,
    progress: &ProgressContext,
) -> Result<(AuthorCounts, AuthorSummary)> {
    let start = Instant::now();
    let paths = expand_inputs(&args.inputs).context("Failed to resolve inputs")?;
    let options = args.read_options(config);

    let (table, load_stats) =
        load_table(&paths, &options, progress).context("Failed to load paper table")?;

    let column = args.column(config);
    let pb = progress.stage_line("authors");
    pb.set_message(format!("collecting '{column}'"));
    let mentions = author_mentions(&table, column)
        .with_context(|| format!("Failed to read author column '{column}'"))?;
    pb.finish_and_clear();

    let summary = AuthorSummary::new(&load_stats, &mentions, start.elapsed());
    if !progress.is_tty() {
        summary.log();
    }
    Ok((mentions, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(column: Option<&str>) -> InputArgs {
        InputArgs {
            inputs: vec!["snapshot.json".to_string()],
            column: column.map(str::to_string),
            max_rows: Some(10),
            skip_invalid: false,
        }
    }

    #[test]
    fn column_defaults_to_config() {
        let config = Config::default();
        assert_eq!(args(None).column(&config), "authors_parsed");
        assert_eq!(args(Some("authors")).column(&config), "authors");
    }

    #[test]
    fn read_options_merge_config() {
        let mut config = Config::default();
        config.input.skip_invalid = true;
        let options = args(None).read_options(&config);
        assert!(options.skip_invalid);
        assert_eq!(options.max_rows, Some(10));
        assert_eq!(options.column.as_deref(), Some("authors_parsed"));
    }
}
