//! Output formatting for javadiff CLI
//!
//! Commands hand a result value to [`emit`], which renders it as JSON, JSON
//! Lines or a human-readable table and writes it to stdout or a file.

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// A single JSON array (default)
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
    /// Human-readable table
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Minified JSON on a single line
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            compact: false,
        }
    }

    /// Builder: enable compact mode
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Types that can be rendered in every supported format.
///
/// JSON forms serialize the list returned by [`Outputter::items`].
pub trait Outputter {
    type Item: Serialize;

    fn items(&self) -> &[Self::Item];

    /// Render as table format
    fn to_table(&self, config: &OutputConfig) -> String;

    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self.items(), config)
    }

    fn to_jsonl(&self, config: &OutputConfig) -> String {
        JsonOutput::format_lines(self.items(), config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Json => self.to_json(config),
            OutputFormat::Jsonl => self.to_jsonl(config),
            OutputFormat::Table => self.to_table(config),
        }
    }
}

/// Render `data` and write it to `out`, or stdout when `out` is `None`.
pub fn emit<T: Outputter>(
    data: &T,
    config: &OutputConfig,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut rendered = data.render(config);
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Whether status messages on stderr should be colored.
///
/// Summaries and skip reports go to stderr, so its terminal state decides
/// regardless of where results are written.
pub fn stderr_colors(color_override: Option<bool>) -> bool {
    color_override.unwrap_or_else(|| std::io::stderr().is_terminal())
}

/// Truncate string to max width, adding ellipsis if needed
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Names(Vec<String>);

    impl Outputter for Names {
        type Item = String;

        fn items(&self) -> &[String] {
            &self.0
        }

        fn to_table(&self, _config: &OutputConfig) -> String {
            self.0.join(" | ")
        }
    }

    fn names() -> Names {
        Names(vec!["a".to_string(), "b".to_string()])
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("jsonl".parse::<OutputFormat>(), Ok(OutputFormat::Jsonl));
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_dispatch() {
        let data = names();
        let compact = OutputConfig::new(OutputFormat::Json).compact();
        assert_eq!(data.render(&compact), r#"["a","b"]"#);
        assert_eq!(data.render(&OutputConfig::new(OutputFormat::Jsonl)), "\"a\"\n\"b\"");
        assert_eq!(data.render(&OutputConfig::new(OutputFormat::Table)), "a | b");
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("nested").join("out.jsonl");
        emit(&names(), &OutputConfig::new(OutputFormat::Jsonl), Some(out.as_path())).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "\"a\"\n\"b\"\n");
    }

    #[test]
    fn test_stderr_colors_override_wins() {
        assert!(stderr_colors(Some(true)));
        assert!(!stderr_colors(Some(false)));
        assert_eq!(stderr_colors(None), std::io::stderr().is_terminal());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }
}
