//! Document discovery and ignore filtering.

use crate::config::IgnorePolicy;
use crate::error::{Result, TocError};
use crate::model::DOCUMENT_EXTENSION;
use glob::Pattern;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// One ignore pattern, prepared for matching.
#[derive(Debug)]
struct IgnorePattern {
    /// Per-component globs, matched against the tail of a path.
    /// `None` when a component is not valid glob syntax.
    globs: Option<Vec<Pattern>>,
    /// `/`-separated pieces other than `""` and `"."`, each checked as a
    /// plain substring.
    segments: Vec<String>,
}

impl IgnorePattern {
    fn compile(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
        let globs = parts
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>();
        let globs = match globs {
            Ok(globs) if !globs.is_empty() => Some(globs),
            Ok(_) => None,
            Err(e) => {
                warn!(pattern = raw, "invalid glob pattern, using substring match only: {e}");
                None
            }
        };
        Self {
            globs,
            segments: parts.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Glob match anchored at the end of the path: a pattern of N components
    /// has to match the last N components.
    fn matches_glob(&self, components: &[&str]) -> bool {
        let Some(globs) = &self.globs else {
            return false;
        };
        if globs.len() > components.len() {
            return false;
        }
        let tail = &components[components.len() - globs.len()..];
        globs.iter().zip(tail).all(|(g, c)| g.matches(c))
    }

    /// Any segment occurring anywhere in the path string.
    fn matches_substring(&self, path: &str) -> bool {
        self.segments.iter().any(|s| path.contains(s.as_str()))
    }
}

/// An [`IgnorePolicy`] with its patterns compiled.
#[derive(Debug)]
pub struct Matcher {
    files: Vec<String>,
    patterns: Vec<IgnorePattern>,
}

impl Matcher {
    pub fn new(policy: &IgnorePolicy) -> Self {
        Self {
            files: policy.files.clone(),
            patterns: policy.patterns.iter().map(|p| IgnorePattern::compile(p)).collect(),
        }
    }

    /// Whether a path, relative to the tree root, is excluded.
    ///
    /// Excluded when its file name is listed exactly, when a pattern matches
    /// it as a glob, or when any piece of a pattern appears inside the path
    /// at all (so `node_modules/*` excludes every path mentioning
    /// `node_modules`).
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        let name = rel_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if self.files.iter().any(|f| *f == name) {
            return true;
        }

        let components: Vec<String> = rel_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let components: Vec<&str> = components.iter().map(String::as_str).collect();
        let path_str = components.join("/");

        self.patterns
            .iter()
            .any(|p| p.matches_glob(&components) || p.matches_substring(&path_str))
    }
}

/// Documents to process and documents filtered out, both in walk order.
#[derive(Debug, Default)]
pub struct Selection {
    pub documents: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Find every document under `root` and split them by the ignore policy.
///
/// Failing to read `root` itself is fatal; unreadable subdirectories are
/// logged and skipped.
pub fn select_documents(root: &Path, policy: &IgnorePolicy) -> Result<Selection> {
    let entries = read_sorted(root).map_err(|e| TocError::walk(root, e.to_string()))?;
    let mut found = Vec::new();
    collect_documents(entries, &mut found);

    let matcher = Matcher::new(policy);
    let mut selection = Selection::default();
    for path in found {
        let rel = path.strip_prefix(root).unwrap_or(&path);
        if matcher.is_ignored(rel) {
            selection.skipped.push(path);
        } else {
            selection.documents.push(path);
        }
    }
    debug!(
        documents = selection.documents.len(),
        skipped = selection.skipped.len(),
        "selection complete"
    );
    Ok(selection)
}

fn read_sorted(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Depth-first, sorted, so the order only depends on the tree's contents.
fn collect_documents(entries: Vec<PathBuf>, out: &mut Vec<PathBuf>) {
    for path in entries {
        let Ok(meta) = fs::symlink_metadata(&path) else {
            continue;
        };
        if meta.is_dir() {
            match read_sorted(&path) {
                Ok(children) => collect_documents(children, out),
                Err(e) => warn!(path = %path.display(), "cannot read directory: {e}"),
            }
        } else if is_document(&path) && path.is_file() {
            out.push(path);
        }
    }
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy(files: &[&str], patterns: &[&str]) -> IgnorePolicy {
        IgnorePolicy {
            files: files.iter().map(|s| s.to_string()).collect(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ignored(p: &IgnorePolicy, path: &str) -> bool {
        Matcher::new(p).is_ignored(Path::new(path))
    }

    #[test]
    fn exact_filename_excluded_anywhere() {
        let p = policy(&["SKIP.md"], &[]);
        assert!(ignored(&p, "SKIP.md"));
        assert!(ignored(&p, "docs/deep/SKIP.md"));
        assert!(!ignored(&p, "docs/skip.md"));
        assert!(!ignored(&p, "SKIP.md.md"));
    }

    #[test]
    fn default_patterns() {
        let p = IgnorePolicy::default();
        assert!(ignored(&p, ".git/info/notes.md"));
        assert!(ignored(&p, "node_modules/pkg/README.md"));
        assert!(ignored(&p, "web/node_modules/pkg/README.md"));
        assert!(ignored(&p, "dist/bundle.min.md"));
        assert!(!ignored(&p, "docs/guide.md"));
        assert!(!ignored(&p, "README.md"));
    }

    #[test]
    fn glob_matches_from_the_right() {
        let p = policy(&[], &["drafts/*.md"]);
        assert!(ignored(&p, "drafts/a.md"));
        assert!(ignored(&p, "docs/drafts/a.md"));
    }

    #[test]
    fn star_does_not_cross_separator() {
        let p = policy(&[], &["a*b.md"]);
        assert!(ignored(&p, "x/axxb.md"));
        assert!(!ignored(&p, "ax/b.md"));
    }

    #[test]
    fn substring_rule_is_permissive() {
        let p = policy(&[], &[".git/*"]);
        assert!(ignored(&p, ".github/CONTRIBUTING.md"));

        let p = policy(&[], &["vendor/*"]);
        assert!(ignored(&p, "docs/vendored-notes.md"));
    }

    #[test]
    fn wildcard_segment_is_not_a_substring() {
        let p = policy(&[], &["*.tmp.md"]);
        assert!(!ignored(&p, "docs/guide.md"));
        assert!(ignored(&p, "docs/x.tmp.md"));
    }

    #[test]
    fn empty_segments_match_nothing() {
        let p = policy(&[], &["", "docs/"]);
        assert!(!ignored(&p, "guide.md"));
        assert!(ignored(&p, "docs/guide.md"));
    }

    #[test]
    fn dot_segments_match_nothing() {
        let p = policy(&[], &["./drafts", "."]);
        assert!(!ignored(&p, "guide.md"));
        assert!(!ignored(&p, "notes.v2.md"));
        assert!(ignored(&p, "drafts/wip.md"));
    }

    #[test]
    fn invalid_glob_falls_back_to_substring() {
        let p = policy(&[], &["[abc"]);
        assert!(!ignored(&p, "x.md"));
        assert!(ignored(&p, "dir[abc/x.md"));
    }

    #[test]
    fn selects_sorted_and_filters() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs/sub")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        for f in [
            "README.md",
            "b.md",
            "a.txt",
            "docs/guide.md",
            "docs/sub/deep.md",
            "docs/SKIP.md",
            "node_modules/pkg/README.md",
            ".git/notes.md",
            "x.min.md",
        ] {
            fs::write(root.join(f), "# T\n").unwrap();
        }

        let mut p = IgnorePolicy::default();
        p.files.push("SKIP.md".to_string());
        let sel = select_documents(root, &p).unwrap();

        let rel = |v: &[PathBuf]| -> Vec<String> {
            v.iter()
                .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
                .collect()
        };
        assert_eq!(
            rel(&sel.documents),
            ["README.md", "b.md", "docs/guide.md", "docs/sub/deep.md"]
        );
        assert_eq!(
            rel(&sel.skipped),
            [".git/notes.md", "docs/SKIP.md", "node_modules/pkg/README.md", "x.min.md"]
        );
    }

    #[test]
    fn selection_is_deterministic() {
        let dir = TempDir::new().unwrap();
        for f in ["c.md", "a.md", "b.md"] {
            fs::write(dir.path().join(f), "").unwrap();
        }
        let p = IgnorePolicy::default();
        let first = select_documents(dir.path(), &p).unwrap().documents;
        let second = select_documents(dir.path(), &p).unwrap().documents;
        assert_eq!(first, second);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = select_documents(&dir.path().join("nope"), &IgnorePolicy::default()).unwrap_err();
        assert!(matches!(err, TocError::Walk { .. }));
    }

    #[test]
    fn file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "").unwrap();
        assert!(select_documents(&file, &IgnorePolicy::default()).is_err());
    }
}
