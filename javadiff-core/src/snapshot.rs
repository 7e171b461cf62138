//! Whole-tree extraction and signature-keyed snapshots.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, Stage};
use crate::error::{ExtractError, Result};
use crate::javadoc::DEFAULT_WINDOW;
use crate::parser::{find_package_name, JavaParser};
use crate::scanner::{scan_directory, ScannedFile};
use crate::source::SourceUnit;
use crate::types::{MethodRecord, SignatureKey};
use crate::walker::MethodWalker;

/// Extraction settings shared by scanning and snapshot building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// File extensions treated as Java sources.
    pub extensions: Vec<String>,
    /// Bytes scanned backwards from a declaration for its Javadoc.
    pub javadoc_window: usize,
    /// Extra glob patterns to exclude.
    pub ignore: Vec<String>,
    pub follow_symlinks: bool,
    pub respect_gitignore: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            javadoc_window: DEFAULT_WINDOW,
            ignore: Vec::new(),
            follow_symlinks: false,
            respect_gitignore: false,
        }
    }
}

/// Every method of one source root, keyed for cross-tree matching.
#[derive(Clone, Debug, Default)]
pub struct TreeSnapshot {
    root: PathBuf,
    methods: BTreeMap<SignatureKey, MethodRecord>,
}

impl TreeSnapshot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Insert a record. An existing record with the same key is replaced
    /// and returned.
    ///
    /// Overloads with equal name and arity share a key, so only the last
    /// one inserted survives.
    pub fn insert(&mut self, key: SignatureKey, record: MethodRecord) -> Option<MethodRecord> {
        let replaced = self.methods.insert(key, record);
        if let Some(old) = &replaced {
            tracing::trace!(
                file = %old.file_path,
                method = %old.fully_qualified_name(),
                "signature key collision, keeping later declaration"
            );
        }
        replaced
    }

    pub fn get(&self, key: &SignatureKey) -> Option<&MethodRecord> {
        self.methods.get(key)
    }

    pub fn contains_key(&self, key: &SignatureKey) -> bool {
        self.methods.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &SignatureKey> {
        self.methods.keys()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SignatureKey, &MethodRecord)> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Runs the parser and walker over source trees.
///
/// Owns one tree-sitter parser, so each thread needs its own builder.
pub struct SnapshotBuilder {
    parser: JavaParser,
    options: ExtractOptions,
}

impl SnapshotBuilder {
    pub fn new() -> Result<Self> {
        Self::with_options(ExtractOptions::default())
    }

    pub fn with_options(options: ExtractOptions) -> Result<Self> {
        Ok(Self {
            parser: JavaParser::new()?,
            options,
        })
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every method of a single loaded file.
    pub fn extract_file(&mut self, unit: &SourceUnit) -> Result<Vec<MethodRecord>> {
        let source = unit.bytes();
        let tree = self.parser.parse(source).ok_or_else(|| ExtractError::Parse {
            path: unit.path().to_path_buf(),
        })?;

        if tree.has_errors() {
            tracing::debug!(path = %unit.path().display(), "syntax errors, extracting what parsed");
        }

        let package = find_package_name(&tree, source);
        let file_path = unit.path().display().to_string();
        let records: Vec<MethodRecord> =
            MethodWalker::new(&tree, source, &file_path, package.as_deref())
                .with_javadoc_window(self.options.javadoc_window)
                .collect();
        Ok(records)
    }

    /// Build the keyed snapshot of every source file under `root`.
    ///
    /// Files that fail to load or parse are recorded in `diagnostics` and
    /// skipped. Only a missing root is an error.
    pub fn build(&mut self, root: &Path, diagnostics: &mut Diagnostics) -> Result<TreeSnapshot> {
        let mut snapshot = TreeSnapshot::new(root);
        for (file, records) in self.extract_files(root, diagnostics)? {
            for record in records {
                let key = SignatureKey::new(file.rel_path.as_str(), &record);
                snapshot.insert(key, record);
            }
        }

        tracing::debug!(root = %root.display(), methods = snapshot.len(), "built snapshot");
        Ok(snapshot)
    }

    /// Extract every method under `root` without keying.
    ///
    /// Records are grouped by file in relative path order. Overloads that
    /// would share a signature key are all kept.
    pub fn extract_tree(
        &mut self,
        root: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<MethodRecord>> {
        Ok(self
            .extract_files(root, diagnostics)?
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect())
    }

    fn extract_files(
        &mut self,
        root: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<(ScannedFile, Vec<MethodRecord>)>> {
        let scan = scan_directory(root, &self.options, diagnostics)?;

        let mut extracted = Vec::with_capacity(scan.files.len());
        for file in scan.files {
            let unit = match SourceUnit::read(&file.path) {
                Ok(unit) => unit,
                Err(e) => {
                    diagnostics.warn(&file.path, Stage::Read, e);
                    continue;
                }
            };
            match self.extract_file(&unit) {
                Ok(records) => extracted.push((file, records)),
                Err(e) => diagnostics.warn(&file.path, Stage::Parse, e),
            }
        }
        Ok(extracted)
    }
}
