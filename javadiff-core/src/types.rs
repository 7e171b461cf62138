//! Data models for extracted methods and their cross-tree keys.

use serde::{Deserialize, Serialize};

/// Name given to constructor records. Never a valid Java identifier.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name given to methods whose identifier could not be recovered.
pub const UNKNOWN_NAME: &str = "<unknown>";

/// Separator joining the containment path inside a [`SignatureKey`].
pub const QUALIFIER_SEPARATOR: &str = "$";

/// One method or constructor declaration extracted from a source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub file_path: String,
    pub package_name: Option<String>,
    /// Enclosing named types, outermost first.
    pub containment_path: Vec<String>,
    pub method_name: String,
    /// Raw parameter declarations with whitespace collapsed.
    pub parameters: Vec<String>,
    pub return_type: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub start_byte: usize,
    pub end_byte: usize,
    pub javadoc: Option<String>,
    pub code: String,
}

impl MethodRecord {
    pub fn is_constructor(&self) -> bool {
        self.method_name == CONSTRUCTOR_NAME
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Containment path joined binary-name style, e.g. `Outer$Inner`.
    pub fn class_qualifier(&self) -> String {
        self.containment_path.join(QUALIFIER_SEPARATOR)
    }

    /// Package, containment path and name joined with `.`, skipping empty parts.
    pub fn fully_qualified_name(&self) -> String {
        self.package_name
            .iter()
            .map(String::as_str)
            .chain(self.containment_path.iter().map(String::as_str))
            .chain(std::iter::once(self.method_name.as_str()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Key used to match methods across two independently parsed trees.
///
/// Field order defines the sort order of diff output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureKey {
    /// Path relative to the scanned root, always `/`-separated.
    pub file_rel_path: String,
    pub class_qualifier: String,
    pub method_name: String,
    pub arity: usize,
}

impl SignatureKey {
    pub fn new(file_rel_path: impl Into<String>, record: &MethodRecord) -> Self {
        Self {
            file_rel_path: file_rel_path.into(),
            class_qualifier: record.class_qualifier(),
            method_name: record.method_name.clone(),
            arity: record.arity(),
        }
    }
}

impl std::fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.file_rel_path)?;
        if !self.class_qualifier.is_empty() {
            write!(f, "{}.", self.class_qualifier)?;
        }
        write!(f, "{}/{}", self.method_name, self.arity)
    }
}
