//! Anchor generation and table-of-contents rendering.

use crate::model::{HeaderRecord, INDEX_DOCUMENT, TOC_HEADING};
use regex::Regex;
use std::sync::LazyLock;

static RE_ANCHOR_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_ANCHOR_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Heading anchor for a title.
///
/// - lowercase
/// - drop every char that isn't alphanumeric, underscore, whitespace, or hyphen
/// - collapse runs of whitespace and hyphens into a single hyphen
///
/// Leading and trailing runs are collapsed, not trimmed: `"Intro "` gives `"intro-"`.
pub fn anchor(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = RE_ANCHOR_STRIP.replace_all(&lower, "");
    RE_ANCHOR_DASHES.replace_all(&stripped, "-").into_owned()
}

/// Markdown link to an anchor in the same document.
pub fn toc_link(title: &str, anchor: &str) -> String {
    format!("[{}](#{})", title, anchor)
}

/// One list line, indented two spaces per level below the first.
pub fn toc_item(header: &HeaderRecord) -> String {
    let indent = "  ".repeat(header.level.saturating_sub(1));
    format!("{}- {}", indent, toc_link(&header.title, &header.anchor))
}

/// Line pointing back at the index document's TOC.
pub fn back_link() -> String {
    format!(
        "[Back to {}]({}#{})",
        TOC_HEADING,
        INDEX_DOCUMENT,
        anchor(TOC_HEADING)
    )
}

/// Render the block placed between the TOC markers. Returns an empty string
/// when there are no headers. No trailing newline.
pub fn render_toc(headers: &[HeaderRecord], filename: &str) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut lines = vec![format!("## {}", TOC_HEADING), String::new()];
    lines.extend(headers.iter().map(toc_item));

    if filename != INDEX_DOCUMENT {
        lines.push(String::new());
        lines.push(back_link());
    }

    lines.join("\n")
}
