use indicatif::ProgressBar;
use std::path::Path;

use crate::aggregate::CorpusInventory;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::scanner::{scan_sources, FileEntry};
use crate::source::{InventorySource, StructuralSource};
use crate::symbols::SourceUnit;

/// Scan every source file under `root` structurally and merge the results.
///
/// Only an invalid root is fatal. Oversized, unreadable or malformed files are logged
/// and recorded as failures, and the run continues with the next file.
pub fn scan_directory(root: &Path, cfg: &ScanConfig) -> Result<CorpusInventory, ScanError> {
    scan_directory_with_progress(root, cfg, &ProgressBar::hidden())
}

pub fn scan_directory_with_progress(
    root: &Path,
    cfg: &ScanConfig,
    progress: &ProgressBar,
) -> Result<CorpusInventory, ScanError> {
    let entries = scan_sources(root, cfg)?;
    tracing::info!(root = %root.display(), files = entries.len(), "scanning sources");

    progress.set_length(entries.len() as u64);
    let mut corpus = CorpusInventory::new();
    for entry in &entries {
        progress.set_message(entry.rel_path.display().to_string());
        analyze_entry(entry, cfg.max_file_bytes, &mut corpus);
        progress.inc(1);
    }

    tracing::info!(
        units = corpus.units_merged,
        failed = corpus.failures.len(),
        symbols = corpus.total_symbols(),
        "scan complete"
    );
    Ok(corpus)
}

fn analyze_entry(entry: &FileEntry, max_file_bytes: u64, corpus: &mut CorpusInventory) {
    let unit = SourceUnit::file(&entry.rel_path);
    if entry.bytes > max_file_bytes {
        tracing::warn!(unit = %unit, bytes = entry.bytes, limit = max_file_bytes, "skipping oversized source");
        corpus.record_failure(
            unit,
            format!("skipped: {} bytes exceeds max_file_bytes ({max_file_bytes})", entry.bytes),
        );
        return;
    }
    tracing::debug!(unit = %unit, bytes = entry.bytes, "analyzing");

    let text = match std::fs::read_to_string(&entry.abs_path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(unit = %unit, error = %e, "failed to read source");
            corpus.record_failure(unit, format!("failed to read: {e}"));
            return;
        }
    };

    match StructuralSource::new(unit, text).collect() {
        Ok(inventory) => corpus.merge(inventory),
        Err(e) => {
            tracing::warn!(unit = %e.unit, error = %e.message, "skipping unparseable source");
            corpus.record_failure(e.unit.clone(), e.message);
        }
    }
}
