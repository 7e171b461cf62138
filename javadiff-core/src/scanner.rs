//! Source file discovery using the `ignore` crate.
//!
//! By default every file with a matching extension is found, including
//! gitignored and hidden ones, the way a recursive glob would. Results are
//! sorted by their `/`-separated path relative to the scan root so snapshot
//! building is deterministic.

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::diagnostics::{Diagnostics, Stage};
use crate::error::{ExtractError, Result};
use crate::snapshot::ExtractOptions;

/// Conventional Maven/Gradle location of production sources.
pub const MAIN_SOURCE_DIR: &str = "src/main/java";

/// Information about a scanned file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScannedFile {
    /// Path on disk, as reached from the scan root.
    pub path: PathBuf,

    /// Path relative to the scan root, `/`-separated.
    pub rel_path: String,

    /// File size in bytes.
    pub size_bytes: u64,
}

/// Result of scanning a directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScanResult {
    /// Discovered files, sorted by relative path.
    pub files: Vec<ScannedFile>,

    /// Number of files skipped for not matching an extension.
    pub skipped_count: usize,

    /// Number of entries that could not be visited.
    pub error_count: usize,

    /// Time taken for the scan in milliseconds.
    pub duration_ms: f64,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Narrow a project root to its main source directory when asked to and
/// when that directory exists.
pub fn resolve_source_root(root: &Path, main_only: bool) -> PathBuf {
    if main_only {
        let main = root.join(MAIN_SOURCE_DIR);
        if main.is_dir() {
            return main;
        }
    }
    root.to_path_buf()
}

/// `/`-separated path of `path` relative to `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// The entry a walk error refers to, looking through depth and line wrappers.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// Scan a directory for source files.
///
/// Entries that cannot be visited are recorded in `diagnostics` and skipped.
/// Only a missing root is an error.
pub fn scan_directory(
    root: &Path,
    options: &ExtractOptions,
    diagnostics: &mut Diagnostics,
) -> Result<ScanResult> {
    let start = Instant::now();

    if !root.is_dir() {
        return Err(ExtractError::RootNotFound(root.to_path_buf()));
    }

    let ext_filter: HashSet<String> = options
        .extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .collect();

    let gitignore = options.respect_gitignore;
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .ignore(false)
        .parents(gitignore)
        .git_ignore(gitignore)
        .git_global(gitignore)
        .git_exclude(gitignore)
        .follow_links(options.follow_symlinks);

    if !options.ignore.is_empty() {
        let mut override_builder = OverrideBuilder::new(root);
        for pattern in &options.ignore {
            // `!` turns an override glob into an exclusion
            if let Err(e) = override_builder.add(&format!("!{}", pattern)) {
                tracing::warn!("invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("ignore patterns disabled: {}", e),
        }
    }

    let mut result = ScanResult::default();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                result.error_count += 1;
                let path = error_path(&e).unwrap_or(root).to_path_buf();
                diagnostics.warn(path, Stage::Scan, e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext_filter.contains(&ext.to_lowercase()));
        if !matches {
            result.skipped_count += 1;
            continue;
        }

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let path = entry.into_path();
        result.files.push(ScannedFile {
            rel_path: relative_path(root, &path),
            path,
            size_bytes,
        });
    }

    result.files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    result.duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::debug!(
        root = %root.display(),
        files = result.files.len(),
        skipped = result.skipped_count,
        "scanned source tree"
    );

    Ok(result)
}
