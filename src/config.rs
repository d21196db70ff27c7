//! Ignore policy: built-in defaults, the optional `.tocignore` file, and
//! command-line additions.

use crate::error::{Result, TocError};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Patterns excluded when no config overrides them.
const DEFAULT_PATTERNS: &[&str] = &[".git/*", "node_modules/*", "*.min.md"];

/// Shape of the `.tocignore` file. Both keys are optional; a present key
/// replaces the corresponding default.
#[derive(Debug, Default, Deserialize)]
pub struct IgnoreConfig {
    pub files: Option<Vec<String>>,
    pub patterns: Option<Vec<String>>,
}

/// Exact filenames and path patterns excluded from processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    pub files: Vec<String>,
    pub patterns: Vec<String>,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl IgnorePolicy {
    /// Overlay a parsed config on top of this policy, key by key.
    pub fn merge(mut self, config: IgnoreConfig) -> Self {
        if let Some(files) = config.files {
            self.files = files;
        }
        if let Some(patterns) = config.patterns {
            self.patterns = patterns;
        }
        self
    }

    /// Append caller-supplied filenames and patterns.
    pub fn extend(mut self, files: &[String], patterns: &[String]) -> Self {
        self.files.extend(files.iter().cloned());
        self.patterns.extend(patterns.iter().cloned());
        self
    }
}

/// Read and parse the config at `path`. `Ok(None)` when the file does not exist.
pub fn read_config(path: &Path) -> Result<Option<IgnoreConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(TocError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| TocError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Build the policy for a run. Never fails: a broken config only produces a
/// warning and leaves the defaults in place.
pub fn load_policy(config_path: &Path, files: &[String], patterns: &[String]) -> IgnorePolicy {
    let policy = match read_config(config_path) {
        Ok(Some(config)) => {
            debug!(path = %config_path.display(), "loaded ignore config");
            IgnorePolicy::default().merge(config)
        }
        Ok(None) => {
            debug!(path = %config_path.display(), "no ignore config, using defaults");
            IgnorePolicy::default()
        }
        Err(e) => {
            warn!("{e}; using defaults");
            IgnorePolicy::default()
        }
    };
    policy.extend(files, patterns)
}
