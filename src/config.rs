use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Controls which files a batch scan visits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (lowercase, without dot) treated as JavaScript sources.
    pub extensions: Vec<String>,

    /// Directory *names* to skip anywhere in the tree (e.g. "node_modules").
    ///
    /// These are compared against path components, not full paths.
    pub exclude_dir_names: Vec<String>,

    /// Honour `.gitignore` / `.ignore` files and skip hidden entries.
    /// Off by default: every matching file under the root is scanned.
    pub respect_ignore_files: bool,

    /// Files larger than this are not parsed (minified bundles, vendored blobs).
    /// They are reported as skipped failures rather than dropped silently.
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["js", "mjs", "cjs", "jsx"].map(String::from).to_vec(),
            exclude_dir_names: vec![],
            respect_ignore_files: false,
            max_file_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Lexical scan. Works anywhere, approximate.
    #[default]
    Pattern,
    /// Full parse. Precise, fails on malformed scripts.
    Structural,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub page: PageConfig,
}

/// Load an explicitly requested JSON config. Missing sections fall back to defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str::<Config>(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}
