//! Data model shared by the extractor, renderer and splicer.

/// Opening marker of a generated block. Must sit on its own line.
pub const TOC_START: &str = "<!-- TOC start -->";

/// Closing marker of a generated block. Must sit on its own line.
pub const TOC_END: &str = "<!-- TOC end -->";

/// Heading text of the generated block.
pub const TOC_HEADING: &str = "Table of Contents";

/// The top-level document. Every other document links back to its TOC.
pub const INDEX_DOCUMENT: &str = "README.md";

/// Extension of the documents the tool operates on.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Default name of the ignore config, looked up in the tree root.
pub const IGNORE_FILE: &str = ".tocignore";

/// A single section header extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Depth below the document title: `##` is 1, `######` is 5.
    pub level: usize,
    pub title: String,
    /// In-document link target derived from `title`.
    pub anchor: String,
}

/// Result of processing one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was rewritten with a new block.
    Updated,
    /// The block was already current.
    Unchanged,
    /// No existing block and no title line to insert after.
    NoInsertionPoint,
    /// Check mode only: the block is missing or outdated.
    Stale,
}
