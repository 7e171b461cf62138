//! Helper functions for arena tree navigation.

use crate::source::slice_text;
use crate::tree::{NodeId, SyntaxTree};

/// Get the text content of a node.
pub fn node_text(tree: &SyntaxTree, id: NodeId, source: &[u8]) -> String {
    let range = tree.byte_range(id);
    slice_text(source, range.start, range.end)
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
