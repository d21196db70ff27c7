//! Splice a rendered TOC block into document text.
//!
//! An existing block (start marker line through end marker line) is replaced
//! in place. Without one, a new block is inserted right after the document
//! title. Running the splice twice on its own output changes nothing.

use crate::error::{Result, TocError};
use crate::headers::extract_headers;
use crate::model::{FileOutcome, TOC_END, TOC_HEADING, TOC_START};
use crate::toc::render_toc;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Result of splicing a document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    /// New content. May equal the input when the block was already current.
    Content(String),
    /// No block to replace and nowhere to insert one.
    NoInsertionPoint,
    /// A marker appears, but not as a start line followed by an end line.
    /// Inserting would leave two blocks, so the document is left alone.
    MalformedMarkers,
}

/// Where the splice goes, as line indices.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    /// Inclusive line span of an existing block.
    Replace { start: usize, end: usize },
    /// Index of the title line; the block goes after it.
    InsertAfter(usize),
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.trim_end() == marker
}

fn is_title(line: &str) -> bool {
    line.starts_with("# ") && !line.starts_with(&format!("# {}", TOC_HEADING))
}

/// First start marker line, paired with the first end marker line after it.
fn find_block(lines: &[&str]) -> Option<(usize, usize)> {
    let start = lines.iter().position(|l| is_marker(l, TOC_START))?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| is_marker(l, TOC_END))?;
    Some((start, start + 1 + end))
}

fn find_target(content: &str, lines: &[&str]) -> std::result::Result<Option<Target>, Splice> {
    if let Some((start, end)) = find_block(lines) {
        return Ok(Some(Target::Replace { start, end }));
    }
    if content.contains(TOC_START) || content.contains(TOC_END) {
        return Err(Splice::MalformedMarkers);
    }
    Ok(lines.iter().position(|l| is_title(l)).map(Target::InsertAfter))
}

/// Splice a freshly rendered TOC into `content`. `filename` is the document's
/// base name, which decides whether a back-link is rendered.
pub fn splice(content: &str, filename: &str) -> Splice {
    let headers = extract_headers(content);
    let block = render_toc(&headers, filename);
    let lines: Vec<&str> = content.split('\n').collect();

    let target = match find_target(content, &lines) {
        Ok(Some(target)) => target,
        Ok(None) => return Splice::NoInsertionPoint,
        Err(malformed) => return malformed,
    };

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + headers.len() + 8);
    match target {
        Target::Replace { start, end } => {
            out.extend_from_slice(&lines[..start]);
            out.extend_from_slice(&[TOC_START, block.as_str(), TOC_END]);
            out.extend_from_slice(&lines[end + 1..]);
        }
        Target::InsertAfter(title) => {
            if block.is_empty() {
                return Splice::NoInsertionPoint;
            }
            out.extend_from_slice(&lines[..=title]);
            out.extend_from_slice(&["", TOC_START, block.as_str(), TOC_END, ""]);
            out.extend_from_slice(&lines[title + 1..]);
        }
    }
    Splice::Content(out.join("\n"))
}

/// How [`update_file`] treats a document whose block is out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite the file.
    Write,
    /// Report staleness only.
    Check,
}

/// Read a document, splice its TOC and write it back when it changed.
pub fn update_file(path: &Path, mode: Mode) -> Result<FileOutcome> {
    let content = fs::read_to_string(path).map_err(|e| TocError::io(path, e))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let updated = match splice(&content, &filename) {
        Splice::NoInsertionPoint => return Ok(FileOutcome::NoInsertionPoint),
        Splice::MalformedMarkers => {
            warn!(
                path = %path.display(),
                "TOC markers present but not a start/end line pair; leaving document as is"
            );
            return Ok(FileOutcome::NoInsertionPoint);
        }
        Splice::Content(updated) => updated,
    };

    if updated == content {
        debug!(path = %path.display(), "TOC already current");
        return Ok(FileOutcome::Unchanged);
    }
    if mode == Mode::Check {
        return Ok(FileOutcome::Stale);
    }

    fs::write(path, &updated).map_err(|e| TocError::io(path, e))?;
    Ok(FileOutcome::Updated)
}
