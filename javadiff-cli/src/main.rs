//! javadiff CLI - Method-level extraction and diff for Java source trees
//!
//! `scan` lists every method and constructor of one tree with its Javadoc.
//! `diff` compares a buggy and a fixed tree and reports added, removed and
//! modified methods.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::CommandContext;
use config::JavadiffConfig;
use output::{stderr_colors, OutputConfig, OutputFormat};

/// Extract Java methods and Javadoc from source trees using tree-sitter.
#[derive(Parser)]
#[command(name = "javadiff")]
#[command(author, version)]
#[command(about = "Extract Java methods and Javadoc, and diff them across two source trees")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  javadiff scan src/main/java              List every method as JSON
  javadiff scan . --main-only --jsonl      One record per line, production code only
  javadiff diff buggy/ fixed/ -o diff.json Methods that changed between two checkouts")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Emit JSON lines instead of a single JSON array
    #[arg(long, global = true, conflicts_with = "format")]
    jsonl: bool,

    /// Minified JSON output
    #[arg(long, global = true)]
    compact: bool,

    /// Only scan src/main/java when the root contains it
    #[arg(long, global = true)]
    main_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single source tree
    Scan {
        /// Path to source root directory
        source: PathBuf,

        /// Path to output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compare buggy and fixed trees method by method
    Diff {
        /// Path to buggy source root
        buggy: PathBuf,

        /// Path to fixed source root
        fixed: PathBuf,

        /// Path to output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Set up tracing/logging
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .javadiff.toml
    let config = JavadiffConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > JSON
    let format = if cli.jsonl {
        OutputFormat::Jsonl
    } else {
        cli.format.unwrap_or_else(|| {
            config
                .default_format()
                .and_then(|f| f.parse().ok())
                .unwrap_or_default()
        })
    };

    let mut output = OutputConfig::new(format);
    if cli.compact || !config.pretty() {
        output = output.compact();
    }
    colored::control::set_override(stderr_colors(config.use_color()));

    let ctx = CommandContext {
        extract: config.extract_options(),
        output,
        main_only: cli.main_only || config.main_only(),
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Scan { source, out } => commands::scan::run(&source, out.as_deref(), &ctx),
        Commands::Diff { buggy, fixed, out } => {
            commands::diff::run(&buggy, &fixed, out.as_deref(), &ctx)
        }
    }
}
