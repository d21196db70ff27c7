//! Section header extraction.

use crate::model::{HeaderRecord, TOC_HEADING};
use crate::toc;
use regex::Regex;
use std::sync::LazyLock;

/// `##` through `######`, whitespace, then the title. A lone `#` is the
/// document title and is not listed.
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,6})\s+(.+)").unwrap());

/// Parse a single line into a header, if it is one.
pub fn parse_header(line: &str) -> Option<HeaderRecord> {
    let caps = RE_HEADER.captures(line)?;
    let title = caps[2].trim();
    if title.is_empty() || title.eq_ignore_ascii_case(TOC_HEADING) {
        return None;
    }
    Some(HeaderRecord {
        level: caps[1].len() - 1,
        title: title.to_string(),
        anchor: toc::anchor(title),
    })
}

/// Extract all section headers in document order, skipping any
/// "Table of Contents" header so a generated block never lists itself.
pub fn extract_headers(content: &str) -> Vec<HeaderRecord> {
    content.split('\n').filter_map(parse_header).collect()
}
