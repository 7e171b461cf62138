//! Structural walker over a lowered Java syntax tree.
//!
//! [`MethodWalker`] is a single-pass iterator: it yields one [`MethodRecord`]
//! per method or constructor declaration and is exhausted afterwards. Build
//! a new walker to traverse the same tree again.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::javadoc::{find_leading_javadoc, DEFAULT_WINDOW};
use crate::parser::helpers::{collapse_whitespace, node_text};
use crate::source::{byte_to_line_col, slice_text};
use crate::tree::{Field, NodeId, NodeKind, SyntaxTree};
use crate::types::{MethodRecord, CONSTRUCTOR_NAME, UNKNOWN_NAME};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(").unwrap());

/// Walk every method-like declaration of a parsed file.
pub fn walk_methods<'t>(
    tree: &'t SyntaxTree,
    source: &'t [u8],
    file_path: &'t str,
    package_name: Option<&'t str>,
) -> MethodWalker<'t> {
    MethodWalker::new(tree, source, file_path, package_name)
}

/// Depth-first iterator yielding a [`MethodRecord`] per declaration.
///
/// Emission order follows the traversal, which is not guaranteed to be
/// source order. Sort downstream when order matters.
pub struct MethodWalker<'t> {
    tree: &'t SyntaxTree,
    source: &'t [u8],
    file_path: &'t str,
    package_name: Option<&'t str>,
    javadoc_window: usize,
    stack: Vec<NodeId>,
}

impl<'t> MethodWalker<'t> {
    pub fn new(
        tree: &'t SyntaxTree,
        source: &'t [u8],
        file_path: &'t str,
        package_name: Option<&'t str>,
    ) -> Self {
        Self {
            tree,
            source,
            file_path,
            package_name,
            javadoc_window: DEFAULT_WINDOW,
            stack: vec![tree.root()],
        }
    }

    /// Bytes scanned backwards from each declaration for its Javadoc.
    pub fn with_javadoc_window(mut self, window: usize) -> Self {
        self.javadoc_window = window;
        self
    }

    fn record(&self, id: NodeId) -> MethodRecord {
        let range = self.tree.byte_range(id);
        let (start_line, _) = byte_to_line_col(self.source, range.start);
        let (end_line, _) = byte_to_line_col(self.source, range.end);

        MethodRecord {
            file_path: self.file_path.to_string(),
            package_name: self.package_name.map(str::to_string),
            containment_path: self.containment_path(id),
            method_name: self.method_name(id),
            parameters: self.parameters(id),
            return_type: self.return_type(id),
            start_line,
            end_line,
            start_byte: range.start,
            end_byte: range.end,
            javadoc: find_leading_javadoc(range.start, self.source, self.javadoc_window),
            code: slice_text(self.source, range.start, range.end),
        }
    }

    /// Names of the enclosing named types, outermost first.
    ///
    /// Anonymous class bodies are not type declarations and contribute nothing.
    fn containment_path(&self, id: NodeId) -> Vec<String> {
        let mut path: Vec<String> = self
            .tree
            .ancestors(id)
            .filter(|&ancestor| self.tree.kind(ancestor).is_type_like())
            .filter_map(|ancestor| self.tree.name_node(ancestor))
            .map(|name| node_text(self.tree, name, self.source).trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        path.reverse();
        path
    }

    fn method_name(&self, id: NodeId) -> String {
        if self.tree.kind(id) == NodeKind::Constructor {
            return CONSTRUCTOR_NAME.to_string();
        }

        if let Some(name) = self.tree.child_by_field(id, Field::Name) {
            let text = node_text(self.tree, name, self.source);
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }

        let text = node_text(self.tree, id, self.source);
        NAME_RE
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| UNKNOWN_NAME.to_string(), |m| m.as_str().to_string())
    }

    fn parameters(&self, id: NodeId) -> Vec<String> {
        let Some(list) = self
            .tree
            .child_by_field(id, Field::Parameters)
            .or_else(|| self.tree.child_of_kind(id, NodeKind::FormalParameters))
        else {
            return Vec::new();
        };

        self.tree
            .children(list)
            .iter()
            .copied()
            .filter(|&child| matches!(self.tree.kind(child), NodeKind::Parameter(_)))
            .map(|child| collapse_whitespace(&node_text(self.tree, child, self.source)))
            .collect()
    }

    fn return_type(&self, id: NodeId) -> Option<String> {
        if self.tree.kind(id) != NodeKind::Method {
            return None;
        }
        self.tree
            .child_by_field(id, Field::Type)
            .map(|ty| node_text(self.tree, ty, self.source).trim().to_string())
    }
}

impl Iterator for MethodWalker<'_> {
    type Item = MethodRecord;

    fn next(&mut self) -> Option<MethodRecord> {
        while let Some(id) = self.stack.pop() {
            self.stack.extend(self.tree.children(id).iter().rev().copied());
            if self.tree.kind(id).is_method_like() {
                return Some(self.record(id));
            }
        }
        None
    }
}
