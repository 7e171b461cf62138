//! Scan command - Extract every method of one source tree

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use colored::Colorize;
use javadiff_core::{resolve_source_root, Diagnostics, MethodRecord, SnapshotBuilder};

use super::{report_skipped, CommandContext};
use crate::output::{emit, truncate, OutputConfig, Outputter, TableOutput};

/// All methods found under one root, in file order.
#[derive(Debug)]
pub struct ScanReport {
    pub methods: Vec<MethodRecord>,
}

impl Outputter for ScanReport {
    type Item = MethodRecord;

    fn items(&self) -> &[MethodRecord] {
        &self.methods
    }

    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .methods
            .iter()
            .map(|m| {
                vec![
                    format!("{}:{}-{}", m.file_path, m.start_line, m.end_line),
                    m.fully_qualified_name(),
                    m.arity().to_string(),
                    m.javadoc
                        .as_deref()
                        .and_then(|doc| doc.lines().map(str::trim).find(|l| !l.is_empty()))
                        .map(|first| truncate(first, 48))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        TableOutput::from_rows(&["Location", "Method", "Arity", "Javadoc"], &rows, &[2], config)
    }
}

pub fn run(source: &Path, out: Option<&Path>, ctx: &CommandContext) -> anyhow::Result<()> {
    let start = Instant::now();
    let root = resolve_source_root(source, ctx.main_only);
    tracing::debug!("scanning {}", root.display());

    let mut builder = SnapshotBuilder::with_options(ctx.extract.clone())?;
    let mut diagnostics = Diagnostics::new();
    let methods = builder
        .extract_tree(&root, &mut diagnostics)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let report = ScanReport { methods };
    emit(&report, &ctx.output, out)?;

    report_skipped(&diagnostics, ctx.quiet);
    if !ctx.quiet {
        eprintln!(
            "{} {} methods in {} ({}ms)",
            "SCAN:".cyan().bold(),
            report.methods.len().to_string().cyan(),
            root.display(),
            start.elapsed().as_millis()
        );
    }
    Ok(())
}
