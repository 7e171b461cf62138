//! Arena-backed syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Every
//! node stores its parent index, so ancestor chains are walked by chasing
//! indices instead of holding back-pointers into a borrowed parser tree.

/// Index of a node inside a [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type-like declarations that contribute to a containment path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
}

/// Parameter node flavours inside a `formal_parameters` list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    Formal,
    Receiver,
    Spread,
}

/// Node kinds the extractor cares about.
///
/// Anything the grammar produces that is not listed here maps to
/// [`NodeKind::Other`] and is traversed but otherwise ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    PackageDeclaration,
    TypeDeclaration(TypeKind),
    Method,
    Constructor,
    FormalParameters,
    Parameter(ParameterKind),
    Identifier,
    ScopedIdentifier,
    Comment,
    Other,
}

impl NodeKind {
    /// Map a tree-sitter-java node kind to a [`NodeKind`].
    pub fn from_grammar(kind: &str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "package_declaration" => NodeKind::PackageDeclaration,
            "class_declaration" => NodeKind::TypeDeclaration(TypeKind::Class),
            "interface_declaration" => NodeKind::TypeDeclaration(TypeKind::Interface),
            "enum_declaration" => NodeKind::TypeDeclaration(TypeKind::Enum),
            "record_declaration" => NodeKind::TypeDeclaration(TypeKind::Record),
            "annotation_type_declaration" => NodeKind::TypeDeclaration(TypeKind::AnnotationType),
            "method_declaration" => NodeKind::Method,
            "constructor_declaration" => NodeKind::Constructor,
            "formal_parameters" => NodeKind::FormalParameters,
            "formal_parameter" => NodeKind::Parameter(ParameterKind::Formal),
            "receiver_parameter" => NodeKind::Parameter(ParameterKind::Receiver),
            "spread_parameter" => NodeKind::Parameter(ParameterKind::Spread),
            "identifier" => NodeKind::Identifier,
            "scoped_identifier" => NodeKind::ScopedIdentifier,
            "line_comment" | "block_comment" => NodeKind::Comment,
            _ => NodeKind::Other,
        }
    }

    pub fn is_type_like(self) -> bool {
        matches!(self, NodeKind::TypeDeclaration(_))
    }

    pub fn is_method_like(self) -> bool {
        matches!(self, NodeKind::Method | NodeKind::Constructor)
    }
}

/// Grammar field a node occupies in its parent, if any we use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Type,
    Parameters,
    Body,
}

impl Field {
    pub fn from_grammar(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Field::Name),
            "type" => Some(Field::Type),
            "parameters" => Some(Field::Parameters),
            "body" => Some(Field::Body),
            _ => None,
        }
    }
}

/// A single node in the arena.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub field: Option<Field>,
    pub start_byte: usize,
    pub end_byte: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A parsed compilation unit stored as an arena of nodes.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    has_errors: bool,
}

impl SyntaxTree {
    /// Create a tree holding only a root node.
    pub fn new(root_kind: NodeKind, start_byte: usize, end_byte: usize) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: root_kind,
                field: None,
                start_byte,
                end_byte,
                parent: None,
                children: Vec::new(),
            }],
            has_errors: false,
        }
    }

    /// Append a child under `parent`, after its existing children.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        field: Option<Field>,
        start_byte: usize,
        end_byte: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            field,
            start_byte,
            end_byte: end_byte.max(start_byte),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the parser reported syntax errors anywhere in the tree.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub(crate) fn set_has_errors(&mut self, has_errors: bool) {
        self.has_errors = has_errors;
    }

    /// Iterate over the ancestors of a node, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// First child occupying the given grammar field.
    pub fn child_by_field(&self, id: NodeId, field: Field) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].field == Some(field))
    }

    /// First child of the given kind.
    pub fn child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].kind == kind)
    }

    /// The declared name of a node: its `name` field, else its first
    /// identifier child.
    pub fn name_node(&self, id: NodeId) -> Option<NodeId> {
        self.child_by_field(id, Field::Name)
            .or_else(|| self.child_of_kind(id, NodeKind::Identifier))
    }

    /// Byte range of a node.
    pub fn byte_range(&self, id: NodeId) -> std::ops::Range<usize> {
        let node = &self.nodes[id.0];
        node.start_byte..node.end_byte
    }
}

/// Iterator over a node's ancestors, see [`SyntaxTree::ancestors`].
pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
