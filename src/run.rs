//! Batch run over a tree: load the policy, select documents, splice each.

use crate::config::load_policy;
use crate::error::Result;
use crate::model::{FileOutcome, IGNORE_FILE};
use crate::select::select_documents;
use crate::splice::{update_file, Mode};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Inputs for [`run`], filled from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    /// Overrides `<root>/.tocignore`.
    pub config: Option<PathBuf>,
    pub ignore_files: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub mode: Mode,
}

impl RunOptions {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join(IGNORE_FILE))
    }
}

/// Counts for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Documents handled without error, whatever the outcome.
    pub processed: usize,
    pub updated: usize,
    pub stale: usize,
    /// Excluded by the ignore policy.
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: FileOutcome) {
        self.processed += 1;
        match outcome {
            FileOutcome::Updated => self.updated += 1,
            FileOutcome::Stale => self.stale += 1,
            FileOutcome::Unchanged | FileOutcome::NoInsertionPoint => {}
        }
    }
}

/// Process every selected document. Per-file failures are reported and
/// counted; only failing to scan the root aborts.
pub fn run(opts: &RunOptions) -> Result<Summary> {
    let policy = load_policy(
        &opts.config_path(),
        &opts.ignore_files,
        &opts.ignore_patterns,
    );
    let selection = select_documents(&opts.root, &policy)?;

    let mut summary = Summary {
        skipped: selection.skipped.len(),
        ..Summary::default()
    };
    for path in &selection.skipped {
        println!("Skipping {} (ignored)", path.display());
    }

    for path in &selection.documents {
        println!("Processing {}", path.display());
        match update_file(path, opts.mode) {
            Ok(outcome) => {
                report(path, outcome);
                summary.record(outcome);
            }
            Err(e) => {
                error!("{e}");
                summary.failed += 1;
            }
        }
    }

    println!("\nProcessed {} files", summary.processed);
    info!(
        updated = summary.updated,
        stale = summary.stale,
        skipped = summary.skipped,
        failed = summary.failed,
        "run complete"
    );
    Ok(summary)
}

fn report(path: &Path, outcome: FileOutcome) {
    match outcome {
        FileOutcome::Updated => println!("Updated {}", path.display()),
        FileOutcome::Unchanged => println!("Up to date {}", path.display()),
        FileOutcome::Stale => println!("Stale {}", path.display()),
        FileOutcome::NoInsertionPoint => {
            println!("No insertion point in {}, skipped", path.display())
        }
    }
}
