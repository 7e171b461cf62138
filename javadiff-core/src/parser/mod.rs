//! Java parsing boundary.
//!
//! Tree-sitter does the actual parsing. Its tree is immediately lowered into
//! the crate's own [`SyntaxTree`] arena so the rest of the extractor never
//! touches tree-sitter types. Each [`JavaParser`] owns its tree-sitter parser;
//! create one per thread.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Parser;

use crate::error::Result;
use crate::tree::{Field, NodeId, NodeKind, SyntaxTree};

pub(crate) mod helpers;

use helpers::node_text;

static PACKAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"package\s+([a-zA-Z0-9_\.]+)\s*;").unwrap());

/// A reusable tree-sitter parser configured for Java.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_java::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse a source buffer into an arena tree.
    ///
    /// Returns `None` only when tree-sitter gives up entirely; syntax errors
    /// still produce a (partially erroneous) tree.
    pub fn parse(&mut self, source: &[u8]) -> Option<SyntaxTree> {
        let tree = self.parser.parse(source, None)?;
        Some(lower(&tree))
    }
}

/// Copy the named nodes of a tree-sitter tree into an arena.
fn lower(tree: &tree_sitter::Tree) -> SyntaxTree {
    let root = tree.root_node();
    let mut arena = SyntaxTree::new(
        NodeKind::from_grammar(root.kind()),
        root.start_byte(),
        root.end_byte(),
    );
    arena.set_has_errors(root.has_error());

    let mut stack = vec![(root, arena.root())];
    while let Some((node, id)) = stack.pop() {
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            continue;
        }
        loop {
            let child = cursor.node();
            if child.is_named() {
                let field = cursor.field_name().and_then(Field::from_grammar);
                let child_id = arena.push_child(
                    id,
                    NodeKind::from_grammar(child.kind()),
                    field,
                    child.start_byte(),
                    child.end_byte(),
                );
                stack.push((child, child_id));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    arena
}

/// Extract the package name of a compilation unit.
pub fn find_package_name(tree: &SyntaxTree, source: &[u8]) -> Option<String> {
    let root = tree.root();
    let package = tree
        .children(root)
        .iter()
        .copied()
        .find(|&child| tree.kind(child) == NodeKind::PackageDeclaration)?;

    if let Some(name) = package_identifier(tree, package) {
        let text = node_text(tree, name, source);
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    // Fallback to the raw declaration text
    let text = node_text(tree, package, source);
    PACKAGE_RE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn package_identifier(tree: &SyntaxTree, package: NodeId) -> Option<NodeId> {
    tree.child_of_kind(package, NodeKind::ScopedIdentifier)
        .or_else(|| tree.child_of_kind(package, NodeKind::Identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TypeKind;

    fn parse(source: &str) -> SyntaxTree {
        JavaParser::new().unwrap().parse(source.as_bytes()).unwrap()
    }

    #[test]
    fn test_lower_keeps_parent_links() {
        let tree = parse("class Hello { void greet() {} }");
        let root = tree.root();
        assert_eq!(tree.kind(root), NodeKind::Program);

        let class = tree.children(root)[0];
        assert_eq!(tree.kind(class), NodeKind::TypeDeclaration(TypeKind::Class));
        assert_eq!(tree.parent(class), Some(root));

        let name = tree.name_node(class).unwrap();
        assert_eq!(node_text(&tree, name, b"class Hello { void greet() {} }"), "Hello");
    }

    #[test]
    fn test_lower_records_fields() {
        let source = "class A { int size(String s) { return 0; } }";
        let tree = parse(source);
        let class = tree.children(tree.root())[0];
        let body = tree.child_by_field(class, Field::Body).unwrap();
        let method = tree.children(body)[0];
        assert_eq!(tree.kind(method), NodeKind::Method);

        let ty = tree.child_by_field(method, Field::Type).unwrap();
        assert_eq!(node_text(&tree, ty, source.as_bytes()), "int");
        assert!(tree.child_by_field(method, Field::Parameters).is_some());
    }

    #[test]
    fn test_find_package_name_scoped() {
        let source = "package com.example.util;\n\nclass A {}";
        let tree = parse(source);
        assert_eq!(
            find_package_name(&tree, source.as_bytes()),
            Some("com.example.util".to_string())
        );
    }

    #[test]
    fn test_find_package_name_simple() {
        let source = "package demo;\nclass A {}";
        let tree = parse(source);
        assert_eq!(find_package_name(&tree, source.as_bytes()), Some("demo".to_string()));
    }

    #[test]
    fn test_find_package_name_absent() {
        let source = "class A {}";
        let tree = parse(source);
        assert_eq!(find_package_name(&tree, source.as_bytes()), None);
    }

    #[test]
    fn test_find_package_name_regex_fallback() {
        // Hand-built tree whose package declaration has no identifier child
        let source = b"package org.fallback;";
        let mut tree = SyntaxTree::new(NodeKind::Program, 0, source.len());
        let root = tree.root();
        tree.push_child(root, NodeKind::PackageDeclaration, None, 0, source.len());
        assert_eq!(
            find_package_name(&tree, source),
            Some("org.fallback".to_string())
        );
    }

    #[test]
    fn test_syntax_errors_still_produce_tree() {
        let tree = parse("class Broken { void f( { }");
        assert!(tree.has_errors());
        assert!(!tree.is_empty());
    }
}
