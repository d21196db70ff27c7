//! mdtoc: insert and refresh tables of contents in markdown documents.
//!
//! Walks a tree for `*.md` files, collects each document's `##`–`######`
//! headers and writes a linked list of them between
//! `<!-- TOC start -->` / `<!-- TOC end -->` right below the document title.
//! Re-running refreshes the block in place.
//!
//! - `mdtoc`: update every document under the current directory
//! - `mdtoc --check`: report outdated documents without writing

mod config;
mod error;
mod headers;
mod model;
mod run;
mod select;
mod splice;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "mdtoc",
    version,
    about = "Generate tables of contents for markdown files"
)]
struct Cli {
    /// File names to ignore, in addition to the ignore config
    #[arg(long, num_args = 0..)]
    ignore_files: Vec<String>,

    /// Path patterns to ignore, in addition to the ignore config
    #[arg(long, num_args = 0..)]
    ignore_patterns: Vec<String>,

    /// Path to the ignore config (default: <root>/.tocignore)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Report documents whose TOC is missing or outdated without writing them.
    /// Exits with status 1 if any are found.
    #[arg(long)]
    check: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "mdtoc=warn",
        1 => "mdtoc=info",
        2 => "mdtoc=debug",
        _ => "mdtoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = run::RunOptions {
        root: cli.root,
        config: cli.config,
        ignore_files: cli.ignore_files,
        ignore_patterns: cli.ignore_patterns,
        mode: if cli.check {
            splice::Mode::Check
        } else {
            splice::Mode::Write
        },
    };

    let summary = run::run(&opts)
        .with_context(|| format!("failed to process {}", opts.root.display()))?;

    if summary.failed > 0 {
        eprintln!("error: {} file(s) could not be processed", summary.failed);
        return Ok(ExitCode::FAILURE);
    }
    if opts.mode == splice::Mode::Check && summary.stale > 0 {
        eprintln!("{} file(s) have an outdated table of contents", summary.stale);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
