//! Error types for mdtoc.
//!
//! Modules return [`TocError`]; `main` wraps it with `anyhow` for reporting.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// The ignore config exists but could not be read or parsed.
    /// Recovered by the loader, which falls back to defaults.
    #[error("invalid ignore config {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Reading or writing a single document failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The tree root could not be enumerated. Aborts the run.
    #[error("cannot scan {root:?}: {message}")]
    Walk { root: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, TocError>;

impl TocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn walk(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            root: root.into(),
            message: message.into(),
        }
    }
}
