//! javadiff core - method-level extraction and diffing for Java source trees.
//!
//! This crate parses Java files with tree-sitter, walks every method and
//! constructor declaration, attaches its leading Javadoc and compares two
//! snapshots of a source tree method by method.
//!
//! # Pipeline
//!
//! - [`scanner`] finds source files under a root
//! - [`parser`] lowers tree-sitter output into an arena [`tree::SyntaxTree`]
//! - [`walker`] yields one [`MethodRecord`] per declaration
//! - [`snapshot`] keys records by [`SignatureKey`] for one tree
//! - [`differ`] classifies keys of two snapshots as added, removed or modified
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use javadiff_core::{diff_snapshots, Diagnostics, SnapshotBuilder};
//!
//! let mut builder = SnapshotBuilder::new()?;
//! let mut diagnostics = Diagnostics::new();
//! let buggy = builder.build(Path::new("buggy/src"), &mut diagnostics)?;
//! let fixed = builder.build(Path::new("fixed/src"), &mut diagnostics)?;
//!
//! for record in diff_snapshots(&buggy, &fixed).records {
//!     println!("{} {}", record.status().as_str(), record.key());
//! }
//! # Ok::<(), javadiff_core::ExtractError>(())
//! ```

pub mod diagnostics;
pub mod differ;
pub mod error;
pub mod javadoc;
pub mod parser;
pub mod scanner;
pub mod snapshot;
pub mod source;
pub mod tree;
pub mod types;
pub mod walker;

pub use diagnostics::{Diagnostic, Diagnostics, Stage};
pub use differ::{diff_snapshots, DiffRecord, DiffResult, DiffStatus, DiffSummary};
pub use error::{ExtractError, Result};
pub use parser::JavaParser;
pub use scanner::{resolve_source_root, scan_directory, ScanResult, ScannedFile};
pub use snapshot::{ExtractOptions, SnapshotBuilder, TreeSnapshot};
pub use source::SourceUnit;
pub use types::{MethodRecord, SignatureKey, CONSTRUCTOR_NAME, UNKNOWN_NAME};
pub use walker::{walk_methods, MethodWalker};
