//! Count subcommand - number of unique authors

use anyhow::Result;
use arxiv_authors_core::ProgressContext;
use clap::Args;

use super::{InputArgs, load_mentions};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print only the count
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: CountArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let (_, summary) = load_mentions(&args.input, config, progress)?;

    if !args.quiet {
        eprintln!("\n{}", summary.format_table());
    }
    println!("{}", summary.unique_authors);
    Ok(())
}
