//! Leading Javadoc detection and normalization.
//!
//! Comments are not part of the declaration nodes, so the attacher scans a
//! bounded window of raw text before the declaration, takes the last `/** */`
//! block in it and accepts it only when nothing but whitespace and other
//! comments separates it from the declaration.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::source::slice_text;

/// Default number of bytes scanned backwards from a declaration.
///
/// A Javadoc further away than this is not found.
pub const DEFAULT_WINDOW: usize = 20_000;

static JAVADOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*([\s\S]*?)\*/").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap());

/// Find the Javadoc directly attached to a declaration starting at `start_byte`.
pub fn find_leading_javadoc(start_byte: usize, source: &[u8], window: usize) -> Option<String> {
    let start = start_byte.min(source.len());
    let snippet = slice_text(source, start.saturating_sub(window), start);

    let last = JAVADOC_RE.find_iter(&snippet).last()?;

    let between = COMMENT_RE.replace_all(&snippet[last.end()..], "");
    if between.chars().any(|c| !c.is_whitespace()) {
        return None;
    }

    Some(normalize_javadoc(last.as_str()))
}

/// Strip comment markers and leading `*` gutters from a Javadoc block.
///
/// Blank lines are trimmed from both ends only.
pub fn normalize_javadoc(raw: &str) -> String {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let mut lines: Vec<&str> = body.lines().map(strip_gutter).collect();

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn strip_gutter(line: &str) -> &str {
    let line = line.trim_end();
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}
