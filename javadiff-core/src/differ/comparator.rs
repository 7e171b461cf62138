//! Snapshot comparison.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::differ::changes::{DiffRecord, DiffResult};
use crate::snapshot::TreeSnapshot;
use crate::types::MethodRecord;

/// Remove every whitespace character.
///
/// Comments inside the body are kept, so editing comment text still counts
/// as a code change.
pub fn normalize_code(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

fn code_equal(before: &MethodRecord, after: &MethodRecord) -> bool {
    normalize_code(&before.code) == normalize_code(&after.code)
}

fn javadoc_equal(before: &MethodRecord, after: &MethodRecord) -> bool {
    before.javadoc.as_deref().unwrap_or("") == after.javadoc.as_deref().unwrap_or("")
}

/// Classify every key of either snapshot.
///
/// Records come out in ascending key order. Keys in both snapshots whose
/// code matches modulo whitespace and whose Javadoc matches exactly produce
/// no record.
pub fn diff_snapshots(before: &TreeSnapshot, after: &TreeSnapshot) -> DiffResult {
    let start = Instant::now();
    let mut result = DiffResult::new();

    let keys: BTreeSet<_> = before.keys().chain(after.keys()).collect();

    for key in keys {
        match (before.get(key), after.get(key)) {
            (Some(b), None) => result.add(DiffRecord::Removed {
                key: key.clone(),
                before: b.clone(),
            }),
            (None, Some(a)) => result.add(DiffRecord::Added {
                key: key.clone(),
                after: a.clone(),
            }),
            (Some(b), Some(a)) => {
                let code_changed = !code_equal(b, a);
                let javadoc_changed = !javadoc_equal(b, a);
                if code_changed || javadoc_changed {
                    result.add(DiffRecord::Modified {
                        key: key.clone(),
                        before: b.clone(),
                        after: a.clone(),
                        code_changed,
                        javadoc_changed,
                    });
                } else {
                    result.mark_unchanged();
                }
            }
            (None, None) => {}
        }
    }

    result.finalize(start.elapsed().as_secs_f64() * 1000.0);

    tracing::debug!(
        added = result.summary.added,
        removed = result.summary.removed,
        modified = result.summary.modified,
        unchanged = result.summary.unchanged,
        "diffed snapshots"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::DiffStatus;
    use crate::types::SignatureKey;

    fn method(file: &str, name: &str, code: &str, javadoc: Option<&str>) -> MethodRecord {
        MethodRecord {
            file_path: file.to_string(),
            containment_path: vec!["A".to_string()],
            method_name: name.to_string(),
            code: code.to_string(),
            javadoc: javadoc.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    fn snapshot(methods: Vec<MethodRecord>) -> TreeSnapshot {
        let mut snapshot = TreeSnapshot::new("root");
        for m in methods {
            let key = SignatureKey::new(m.file_path.clone(), &m);
            snapshot.insert(key, m);
        }
        snapshot
    }

    fn a() -> MethodRecord {
        method("A.java", "a", "void a() { return; }", Some("Does a."))
    }

    fn b() -> MethodRecord {
        method("A.java", "b", "void b() {}", None)
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" void  f()\n\t{ x = 1; }\r\n"), "voidf(){x=1;}");
    }

    #[test]
    fn test_diff_added() {
        let result = diff_snapshots(&snapshot(vec![a()]), &snapshot(vec![a(), b()]));
        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].status(), DiffStatus::Added);
        assert_eq!(result.records[0].key().method_name, "b");
        assert_eq!(result.summary.unchanged, 1);
    }

    #[test]
    fn test_diff_removed() {
        let result = diff_snapshots(&snapshot(vec![a(), b()]), &snapshot(vec![a()]));
        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].status(), DiffStatus::Removed);
        assert_eq!(result.records[0].before().unwrap().method_name, "b");
    }

    #[test]
    fn test_diff_whitespace_only_is_unchanged() {
        let reformatted = method(
            "A.java",
            "a",
            "void a()\n{\n        return;\n}",
            Some("Does a."),
        );
        let result = diff_snapshots(&snapshot(vec![a()]), &snapshot(vec![reformatted]));
        assert!(result.is_empty());
        assert_eq!(result.summary_text, "No changes");
    }

    #[test]
    fn test_diff_javadoc_only_change() {
        let redocumented = method("A.java", "a", "void a() { return; }", Some("Does A."));
        let result = diff_snapshots(&snapshot(vec![a()]), &snapshot(vec![redocumented]));
        assert_eq!(result.len(), 1);
        match &result.records[0] {
            DiffRecord::Modified {
                code_changed,
                javadoc_changed,
                ..
            } => {
                assert!(!code_changed);
                assert!(javadoc_changed);
            }
            other => panic!("expected modified, got {:?}", other.status()),
        }
    }

    #[test]
    fn test_diff_missing_and_empty_javadoc_are_equal() {
        let before = method("A.java", "b", "void b() {}", None);
        let after = method("A.java", "b", "void b() {}", Some(""));
        let result = diff_snapshots(&snapshot(vec![before]), &snapshot(vec![after]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_diff_comment_text_in_body_counts() {
        let before = method("A.java", "b", "void b() { /* old */ }", None);
        let after = method("A.java", "b", "void b() { /* new */ }", None);
        let result = diff_snapshots(&snapshot(vec![before]), &snapshot(vec![after]));
        assert_eq!(result.summary.modified, 1);
    }

    #[test]
    fn test_diff_output_is_key_ordered() {
        let before = snapshot(vec![
            method("B.java", "z", "1", None),
            method("A.java", "y", "1", None),
        ]);
        let after = snapshot(vec![
            method("C.java", "x", "1", None),
            method("A.java", "w", "1", None),
        ]);
        let result = diff_snapshots(&before, &after);
        let keys: Vec<_> = result.records.iter().map(|r| r.key().to_string()).collect();
        assert_eq!(keys, ["A.java:A.w/0", "A.java:A.y/0", "B.java:A.z/0", "C.java:A.x/0"]);
    }

    #[test]
    fn test_diff_against_self_is_empty() {
        let s = snapshot(vec![a(), b()]);
        let result = diff_snapshots(&s, &s);
        assert!(!result.has_changes());
        assert_eq!(result.summary.unchanged, 2);
    }
}
