//! End-to-end tests: build snapshots of real directories and diff them.

use std::fs;
use std::path::Path;

use javadiff_core::{
    diff_snapshots, resolve_source_root, Diagnostics, DiffRecord, DiffStatus, ExtractOptions,
    SnapshotBuilder, TreeSnapshot,
};
use tempfile::TempDir;

const CALCULATOR: &str = r#"package com.example;

/**
 * Simple arithmetic.
 */
public class Calculator {
    private int memory;

    public Calculator() {
        this.memory = 0;
    }

    /**
     * Adds two numbers.
     */
    public int add(int a, int b) {
        return a + b;
    }

    public int sub(int a, int b) {
        return a - b;
    }

    static class Cache {
        void clear() {}
    }
}
"#;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn build(root: &Path) -> TreeSnapshot {
    let mut diagnostics = Diagnostics::new();
    let snapshot = SnapshotBuilder::new()
        .unwrap()
        .build(root, &mut diagnostics)
        .unwrap();
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    snapshot
}

fn names(records: &[DiffRecord]) -> Vec<(DiffStatus, String)> {
    records
        .iter()
        .map(|r| (r.status(), r.key().to_string()))
        .collect()
}

#[test]
fn test_identical_trees_produce_empty_diff() {
    let buggy = TempDir::new().unwrap();
    let fixed = TempDir::new().unwrap();
    for dir in [&buggy, &fixed] {
        write(dir.path(), "com/example/Calculator.java", CALCULATOR);
    }

    let result = diff_snapshots(&build(buggy.path()), &build(fixed.path()));
    assert!(result.is_empty());
    assert_eq!(result.summary.unchanged, 4);
}

#[test]
fn test_snapshot_built_twice_is_stable() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "com/example/Calculator.java", CALCULATOR);
    write(
        dir.path(),
        "com/example/util/Strings.java",
        "class Strings { static String trim(String s) { return s; } }",
    );

    let first = build(dir.path());
    let second = build(dir.path());
    assert!(diff_snapshots(&first, &second).is_empty());

    let first_keys: Vec<_> = first.keys().cloned().collect();
    let second_keys: Vec<_> = second.keys().cloned().collect();
    assert_eq!(first_keys, second_keys);
}

#[test]
fn test_reformatting_is_not_a_change() {
    let buggy = TempDir::new().unwrap();
    let fixed = TempDir::new().unwrap();
    write(buggy.path(), "com/example/Calculator.java", CALCULATOR);
    let reformatted = CALCULATOR.replace(
        "        return a + b;\n",
        "            return   a+b;\n\n",
    );
    write(fixed.path(), "com/example/Calculator.java", &reformatted);

    let result = diff_snapshots(&build(buggy.path()), &build(fixed.path()));
    assert!(result.is_empty());
}

#[test]
fn test_bug_fix_scenario() {
    let buggy = TempDir::new().unwrap();
    let fixed = TempDir::new().unwrap();
    write(buggy.path(), "com/example/Calculator.java", CALCULATOR);

    let patched = CALCULATOR
        .replace("return a - b;", "return Math.subtractExact(a, b);")
        .replace("Adds two numbers.", "Adds two integers.")
        .replace(
            "    static class Cache {\n        void clear() {}\n    }\n",
            "    public int neg(int a) {\n        return -a;\n    }\n",
        );
    write(fixed.path(), "com/example/Calculator.java", &patched);

    let result = diff_snapshots(&build(buggy.path()), &build(fixed.path()));
    assert_eq!(
        names(&result.records),
        [
            (
                DiffStatus::Modified,
                "com/example/Calculator.java:Calculator.add/2".to_string()
            ),
            (
                DiffStatus::Added,
                "com/example/Calculator.java:Calculator.neg/1".to_string()
            ),
            (
                DiffStatus::Modified,
                "com/example/Calculator.java:Calculator.sub/2".to_string()
            ),
            (
                DiffStatus::Removed,
                "com/example/Calculator.java:Calculator$Cache.clear/0".to_string()
            ),
        ]
    );

    match &result.records[0] {
        DiffRecord::Modified {
            code_changed,
            javadoc_changed,
            after,
            ..
        } => {
            assert!(!code_changed);
            assert!(javadoc_changed);
            assert_eq!(after.javadoc.as_deref(), Some("Adds two integers."));
        }
        other => panic!("expected modified, got {:?}", other.status()),
    }
    assert_eq!(result.summary_text, "methods: 1 added, 1 removed, 2 modified");
}

#[test]
fn test_moved_file_is_removed_and_added() {
    let buggy = TempDir::new().unwrap();
    let fixed = TempDir::new().unwrap();
    write(buggy.path(), "a/Util.java", "class Util { void f() {} }");
    write(fixed.path(), "b/Util.java", "class Util { void f() {} }");

    let result = diff_snapshots(&build(buggy.path()), &build(fixed.path()));
    assert_eq!(result.summary.added, 1);
    assert_eq!(result.summary.removed, 1);
}

#[test]
fn test_diff_json_shape() {
    let buggy = TempDir::new().unwrap();
    let fixed = TempDir::new().unwrap();
    write(buggy.path(), "A.java", "class A { }");
    write(fixed.path(), "A.java", "class A { int size() { return 0; } }");

    let result = diff_snapshots(&build(buggy.path()), &build(fixed.path()));
    let json = serde_json::to_value(&result.records).unwrap();
    let record = &json[0];
    assert_eq!(record["status"], "added");
    assert_eq!(record["signature"]["file_rel_path"], "A.java");
    assert_eq!(record["signature"]["class_qualifier"], "A");
    assert_eq!(record["signature"]["method_name"], "size");
    assert_eq!(record["signature"]["arity"], 0);
    assert!(record["buggy"].is_null());
    assert_eq!(record["fixed"]["return_type"], "int");
    assert_eq!(record["fixed"]["start_line"], 1);
}

#[test]
fn test_main_only_restricts_to_production_sources() {
    let project = TempDir::new().unwrap();
    write(project.path(), "src/main/java/App.java", "class App { void run() {} }");
    write(project.path(), "src/test/java/AppTest.java", "class AppTest { void testRun() {} }");

    let all = build(project.path());
    assert_eq!(all.len(), 2);

    let main = build(&resolve_source_root(project.path(), true));
    assert_eq!(main.len(), 1);
    assert_eq!(main.keys().next().unwrap().file_rel_path, "App.java");
}

#[test]
fn test_javadoc_window_option() {
    let dir = TempDir::new().unwrap();
    let padding = " ".repeat(100);
    write(
        dir.path(),
        "A.java",
        &format!("class A {{\n/**\n * Far.\n */\n{padding}void f() {{}}\n}}"),
    );

    let options = ExtractOptions {
        javadoc_window: 50,
        ..Default::default()
    };
    let mut builder = SnapshotBuilder::with_options(options).unwrap();
    let records = builder
        .extract_tree(dir.path(), &mut Diagnostics::new())
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].javadoc, None);

    let records = SnapshotBuilder::new()
        .unwrap()
        .extract_tree(dir.path(), &mut Diagnostics::new())
        .unwrap();
    assert_eq!(records[0].javadoc.as_deref(), Some("Far."));
}
