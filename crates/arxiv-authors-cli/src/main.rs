//! arxiv-authors - Unique-author statistics for arXiv metadata snapshots
//!
//! Reads the arXiv metadata snapshot (JSON Lines, gzip or Parquet),
//! flattens the parsed author lists and counts distinct authors.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "arxiv-authors")]
#[command(about = "Unique-author statistics for arXiv metadata snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./arxiv-authors.toml or ~/.config/arxiv-authors/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Count unique authors
    Count(cmd::count::CountArgs),
    /// List top authors and optionally export all unique authors to parquet
    Unique(cmd::unique::UniqueArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = arxiv_authors_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — spinners show activity
    //   non-TTY: info unless --debug          — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    arxiv_authors_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Count(args) => cmd::count::run(args, &config, &progress),
        Command::Unique(args) => cmd::unique::run(args, &config, &progress),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["Author column", &config.input.column]);
            table.add_row(vec![
                "Skip invalid lines",
                if config.input.skip_invalid { "yes" } else { "no" },
            ]);
            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);
            table.add_row(vec![
                "Compression level",
                &config.output.compression_level.to_string(),
            ]);
            table.add_row(vec!["Top authors", &config.report.top.to_string()]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
