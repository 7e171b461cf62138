//! Command implementations for javadiff CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod diff;
pub mod scan;

use colored::Colorize;
use javadiff_core::{Diagnostics, ExtractOptions};

use crate::output::OutputConfig;

/// Settings resolved from flags and `.javadiff.toml`, shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub extract: ExtractOptions,
    pub output: OutputConfig,
    pub main_only: bool,
    pub quiet: bool,
}

/// Print skipped files to stderr.
fn report_skipped(diagnostics: &Diagnostics, quiet: bool) {
    if quiet || diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{} {} file(s) could not be processed",
        "SKIPPED:".yellow().bold(),
        diagnostics.len()
    );
    for diagnostic in diagnostics.iter() {
        eprintln!("  {}", diagnostic.to_string().dimmed());
    }
}
