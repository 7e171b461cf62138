//! Error types for javadiff-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for javadiff-core operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while loading, parsing or scanning sources.
///
/// Only [`ExtractError::RootNotFound`] escapes a whole-tree operation; the
/// other variants are per-file and end up as diagnostics.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The Java grammar could not be loaded into the parser.
    #[error("Failed to set Java language: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Tree-sitter returned no tree for a file.
    #[error("Failed to parse Java source: {path}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
    },

    /// The root directory of a scan does not exist.
    #[error("Path does not exist: {0}")]
    RootNotFound(PathBuf),
}

impl ExtractError {
    /// Build an [`ExtractError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
