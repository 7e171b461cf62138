//! Diff command - Method-level diff between a buggy and a fixed source tree
//!
//! Both trees are scanned concurrently, each with its own parser, then
//! compared key by key.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use colored::Colorize;
use javadiff_core::{
    diff_snapshots, resolve_source_root, Diagnostics, DiffRecord, DiffResult, ExtractOptions,
    SnapshotBuilder, TreeSnapshot,
};

use super::{report_skipped, CommandContext};
use crate::output::{emit, OutputConfig, Outputter, TableOutput};

/// Diff records of one tree pair.
#[derive(Debug)]
pub struct DiffReport {
    pub result: DiffResult,
}

fn change_detail(record: &DiffRecord) -> String {
    match record {
        DiffRecord::Modified {
            code_changed,
            javadoc_changed,
            ..
        } => {
            let mut parts = Vec::new();
            if *code_changed {
                parts.push("code");
            }
            if *javadoc_changed {
                parts.push("javadoc");
            }
            parts.join(", ")
        }
        _ => "-".to_string(),
    }
}

impl Outputter for DiffReport {
    type Item = DiffRecord;

    fn items(&self) -> &[DiffRecord] {
        &self.result.records
    }

    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .result
            .records
            .iter()
            .map(|r| {
                vec![
                    r.status().as_str().to_string(),
                    r.key().to_string(),
                    change_detail(r),
                ]
            })
            .collect();

        TableOutput::from_rows(&["Status", "Signature", "Changed"], &rows, &[], config)
    }
}

fn build_snapshot(
    root: &Path,
    options: &ExtractOptions,
) -> anyhow::Result<(TreeSnapshot, Diagnostics)> {
    let mut builder = SnapshotBuilder::with_options(options.clone())?;
    let mut diagnostics = Diagnostics::new();
    let snapshot = builder
        .build(root, &mut diagnostics)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    Ok((snapshot, diagnostics))
}

fn resolve_root(path: &Path, main_only: bool) -> anyhow::Result<PathBuf> {
    if !path.is_dir() {
        anyhow::bail!("Source root does not exist: {}", path.display());
    }
    Ok(resolve_source_root(path, main_only))
}

pub fn run(
    buggy: &Path,
    fixed: &Path,
    out: Option<&Path>,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let buggy_root = resolve_root(buggy, ctx.main_only)?;
    let fixed_root = resolve_root(fixed, ctx.main_only)?;

    let (before, after) = rayon::join(
        || build_snapshot(&buggy_root, &ctx.extract),
        || build_snapshot(&fixed_root, &ctx.extract),
    );
    let (before, mut diagnostics) = before?;
    let (after, after_diagnostics) = after?;
    diagnostics.merge(after_diagnostics);

    let report = DiffReport {
        result: diff_snapshots(&before, &after),
    };
    emit(&report, &ctx.output, out)?;

    report_skipped(&diagnostics, ctx.quiet);
    if !ctx.quiet {
        eprintln!(
            "{} {} in {}ms",
            "DIFF:".cyan().bold(),
            summary_line(&report.result),
            start.elapsed().as_millis()
        );
    }
    Ok(())
}

/// Counts for the stderr summary, or "No changes".
fn summary_line(result: &DiffResult) -> String {
    let summary = &result.summary;
    if summary.total_changes() == 0 {
        return format!("{} ({} unchanged)", result.summary_text, summary.unchanged);
    }
    format!(
        "{} added, {} removed, {} modified, {} unchanged",
        summary.added.to_string().green(),
        summary.removed.to_string().red(),
        summary.modified.to_string().yellow(),
        summary.unchanged
    )
}
