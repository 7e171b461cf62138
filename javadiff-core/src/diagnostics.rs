//! Structured collector for per-file failures.
//!
//! Files that cannot be scanned, read or parsed are skipped. Each skip is
//! recorded here so the caller can inspect or report it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Pipeline stage at which a file was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Scan,
    Read,
    Parse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Scan => "scan",
            Stage::Read => "read",
            Stage::Parse => "parse",
        };
        f.write_str(s)
    }
}

/// One skipped file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path.display(), self.stage, self.message)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped file and emit it as a warning.
    pub fn warn(&mut self, path: impl AsRef<Path>, stage: Stage, message: impl fmt::Display) {
        let diagnostic = Diagnostic {
            path: path.as_ref().to_path_buf(),
            stage,
            message: message.to_string(),
        };
        tracing::warn!(
            path = %diagnostic.path.display(),
            stage = %stage,
            "skipping file: {}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    /// Append the entries of another collector.
    pub fn merge(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_records_entry() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.warn("src/A.java", Stage::Parse, "no tree");
        assert_eq!(diags.len(), 1);

        let entry = diags.iter().next().unwrap();
        assert_eq!(entry.stage, Stage::Parse);
        assert_eq!(entry.to_string(), "src/A.java (parse): no tree");
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut before = Diagnostics::new();
        before.warn("a.java", Stage::Read, "denied");
        let mut after = Diagnostics::new();
        after.warn("b.java", Stage::Scan, "loop");

        before.merge(after);
        let paths: Vec<_> = before.into_iter().map(|d| d.path).collect();
        assert_eq!(paths, [PathBuf::from("a.java"), PathBuf::from("b.java")]);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut diags = Diagnostics::new();
        diags.warn("a.java", Stage::Read, "denied");
        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json[0]["stage"], "read");
        assert_eq!(json[0]["message"], "denied");
    }
}
