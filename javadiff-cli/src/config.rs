//! Configuration loading from `.javadiff.toml`.
//!
//! The file is optional. Missing sections and keys fall back to defaults,
//! and command-line flags override whatever the file sets.
//!
//! # Example Configuration
//!
//! ```toml
//! [scanner]
//! extensions = ["java"]
//! ignore = ["build/", "generated/"]
//! follow_symlinks = false
//! respect_gitignore = false
//! main_only = true
//!
//! [javadoc]
//! window_bytes = 20000
//!
//! [output]
//! format = "jsonl"
//! color = false
//! pretty = true
//! ```

use javadiff_core::ExtractOptions;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = ".javadiff.toml";

/// Root configuration structure loaded from `.javadiff.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct JavadiffConfig {
    /// Which files are discovered.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Javadoc attachment.
    #[serde(default)]
    pub javadoc: JavadocConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Scanner configuration controlling file discovery.
#[derive(Debug, Deserialize, Default)]
pub struct ScannerConfig {
    /// File extensions to extract from. Defaults to `["java"]`.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Additional glob patterns to ignore during scanning.
    ///
    /// # Example
    /// ```toml
    /// ignore = ["build/", "*Generated.java"]
    /// ```
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Skip files matched by `.gitignore`. Off by default so that every
    /// source file on disk is seen.
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Restrict scanning to `src/main/java` when it exists.
    #[serde(default)]
    pub main_only: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct JavadocConfig {
    /// Bytes scanned backwards from a declaration for its Javadoc.
    #[serde(default)]
    pub window_bytes: Option<usize>,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format table`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `json`, `jsonl`, `table`.
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub color: Option<bool>,

    /// Pretty-print JSON output. Defaults to `true`.
    #[serde(default)]
    pub pretty: Option<bool>,
}

impl JavadiffConfig {
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Extraction settings for the core library.
    pub fn extract_options(&self) -> ExtractOptions {
        let defaults = ExtractOptions::default();
        ExtractOptions {
            extensions: self
                .scanner
                .extensions
                .clone()
                .unwrap_or(defaults.extensions),
            javadoc_window: self.javadoc.window_bytes.unwrap_or(defaults.javadoc_window),
            ignore: self.scanner.ignore.clone(),
            follow_symlinks: self.scanner.follow_symlinks,
            respect_gitignore: self.scanner.respect_gitignore,
        }
    }

    pub fn main_only(&self) -> bool {
        self.scanner.main_only
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }
}
