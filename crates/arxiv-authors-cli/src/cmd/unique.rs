//! Unique subcommand - rank unique authors, optionally export to parquet

use std::path::PathBuf;

use anyhow::{Context, Result};
use arxiv_authors_core::{ProgressContext, format_top_authors, top_authors, write_authors};
use clap::Args;

use super::{InputArgs, load_mentions};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct UniqueArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write authors.parquet to this directory (default from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write authors.parquet to the configured default directory
    #[arg(long, conflicts_with = "output")]
    pub export: bool,

    /// Number of top authors to show (0 = none)
    #[arg(long)]
    pub top: Option<usize>,
}

impl UniqueArgs {
    fn output_dir(&self, config: &Config) -> Option<PathBuf> {
        match (&self.output, self.export) {
            (Some(dir), _) => Some(dir.clone()),
            (None, true) => Some(config.output.default_dir.clone()),
            (None, false) => None,
        }
    }
}

pub fn run(args: UniqueArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let (mentions, summary) = load_mentions(&args.input, config, progress)?;
    eprintln!("\n{}", summary.format_table());

    let top = args.top.unwrap_or(config.report.top);
    if top > 0 {
        println!("{}", format_top_authors(&top_authors(&mentions, top)));
    }

    if let Some(dir) = args.output_dir(config) {
        let (path, rows) = write_authors(&mentions, &dir, config.output.compression_level)
            .with_context(|| format!("Failed to write authors to {}", dir.display()))?;
        progress.println(format!("Wrote {rows} authors to {}", path.display()));
    }
    Ok(())
}
