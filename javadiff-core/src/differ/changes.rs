//! Diff record types and result structures.

use serde::{Serialize, Serializer};

use crate::types::{MethodRecord, SignatureKey};

/// Classification of a key present in at least one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Modified => "modified",
        }
    }
}

/// One method that differs between the before and after trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffRecord {
    Added {
        key: SignatureKey,
        after: MethodRecord,
    },
    Removed {
        key: SignatureKey,
        before: MethodRecord,
    },
    Modified {
        key: SignatureKey,
        before: MethodRecord,
        after: MethodRecord,
        /// Code differs beyond whitespace.
        code_changed: bool,
        /// Normalized Javadoc differs.
        javadoc_changed: bool,
    },
}

impl DiffRecord {
    pub fn key(&self) -> &SignatureKey {
        match self {
            DiffRecord::Added { key, .. }
            | DiffRecord::Removed { key, .. }
            | DiffRecord::Modified { key, .. } => key,
        }
    }

    pub fn status(&self) -> DiffStatus {
        match self {
            DiffRecord::Added { .. } => DiffStatus::Added,
            DiffRecord::Removed { .. } => DiffStatus::Removed,
            DiffRecord::Modified { .. } => DiffStatus::Modified,
        }
    }

    /// The record from the before ("buggy") tree, if present there.
    pub fn before(&self) -> Option<&MethodRecord> {
        match self {
            DiffRecord::Removed { before, .. } | DiffRecord::Modified { before, .. } => {
                Some(before)
            }
            DiffRecord::Added { .. } => None,
        }
    }

    /// The record from the after ("fixed") tree, if present there.
    pub fn after(&self) -> Option<&MethodRecord> {
        match self {
            DiffRecord::Added { after, .. } | DiffRecord::Modified { after, .. } => Some(after),
            DiffRecord::Removed { .. } => None,
        }
    }
}

/// Flat wire shape of a [`DiffRecord`].
#[derive(Serialize)]
struct DiffRecordView<'a> {
    status: DiffStatus,
    signature: &'a SignatureKey,
    buggy: Option<&'a MethodRecord>,
    fixed: Option<&'a MethodRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    javadoc_changed: Option<bool>,
}

impl Serialize for DiffRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (code_changed, javadoc_changed) = match self {
            DiffRecord::Modified {
                code_changed,
                javadoc_changed,
                ..
            } => (Some(*code_changed), Some(*javadoc_changed)),
            _ => (None, None),
        };
        DiffRecordView {
            status: self.status(),
            signature: self.key(),
            buggy: self.before(),
            fixed: self.after(),
            code_changed,
            javadoc_changed,
        }
        .serialize(serializer)
    }
}

/// Summary statistics for a diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Keys present in both trees with no relevant change.
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: DiffStatus) {
        match status {
            DiffStatus::Added => self.added += 1,
            DiffStatus::Removed => self.removed += 1,
            DiffStatus::Modified => self.modified += 1,
        }
    }

    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    /// Generate human-readable summary string.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        if self.added > 0 {
            parts.push(format!("{} added", self.added));
        }
        if self.removed > 0 {
            parts.push(format!("{} removed", self.removed));
        }
        if self.modified > 0 {
            parts.push(format!("{} modified", self.modified));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            format!("methods: {}", parts.join(", "))
        }
    }
}

/// Complete result of diffing two snapshots.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiffResult {
    /// Records in ascending key order.
    pub records: Vec<DiffRecord>,

    /// Summary statistics
    pub summary: DiffSummary,

    /// Human-readable summary text
    pub summary_text: String,

    /// Duration of diff operation in milliseconds
    pub duration_ms: f64,
}

impl DiffResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record and update summary.
    pub fn add(&mut self, record: DiffRecord) {
        self.summary.record(record.status());
        self.records.push(record);
    }

    /// Count a key that produced no record.
    pub fn mark_unchanged(&mut self) {
        self.summary.unchanged += 1;
    }

    /// Finalize the result with timing and summary text.
    pub fn finalize(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
        self.summary_text = self.summary.text();
    }

    pub fn has_changes(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with the given status, in key order.
    pub fn filter_status(&self, status: DiffStatus) -> impl Iterator<Item = &DiffRecord> {
        self.records.iter().filter(move |r| r.status() == status)
    }

    /// Records of one file, in key order.
    pub fn filter_by_path<'a>(
        &'a self,
        file_rel_path: &'a str,
    ) -> impl Iterator<Item = &'a DiffRecord> {
        self.records
            .iter()
            .filter(move |r| r.key().file_rel_path == file_rel_path)
    }
}
