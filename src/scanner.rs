use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::ScanError;

fn exclude_overrides(root: &Path, exclude_dir_names: &[String]) -> Result<Override, ignore::Error> {
    let mut ob = OverrideBuilder::new(root);

    // Overrides are whitelists unless negated; `!` turns each entry into an exclusion.
    // Include both the directory entry and its descendants, otherwise the walker may
    // still descend into the directory.
    for d in exclude_dir_names {
        let d = d.trim().trim_matches('/');
        if d.is_empty() {
            continue;
        }
        ob.add(&format!("!**/{d}"))?;
        ob.add(&format!("!**/{d}/**"))?;
    }

    ob.build()
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
    pub bytes: u64,
}

fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    !ext.is_empty() && extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
}

/// Enumerate every source file under `root`, sorted by relative path.
///
/// An invalid root is the one fatal condition and is reported before anything is
/// returned. Unreadable entries below the root are skipped.
pub fn scan_sources(root: &Path, cfg: &ScanConfig) -> Result<Vec<FileEntry>, ScanError> {
    let meta = std::fs::metadata(root).map_err(|_| ScanError::RootMissing(root.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }
    // Enumerability check up front, so a permission problem on the root is fatal
    // rather than silently yielding zero files.
    std::fs::read_dir(root).map_err(|e| ScanError::Walk {
        root: root.to_path_buf(),
        source: ignore::Error::from(e),
    })?;

    let overrides = exclude_overrides(root, &cfg.exclude_dir_names).map_err(|source| ScanError::Walk {
        root: root.to_path_buf(),
        source,
    })?;
    let walker = WalkBuilder::new(root)
        .standard_filters(cfg.respect_ignore_files)
        .overrides(overrides)
        .build();

    let mut entries = Vec::new();
    for item in walker {
        let dent = match item {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !dent.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        if !has_source_extension(dent.path(), &cfg.extensions) {
            continue;
        }

        let abs_path = dent.into_path();
        // Size limits are enforced by the caller so skipped files are still reported;
        // unreadable metadata surfaces later as a read failure.
        let bytes = std::fs::metadata(&abs_path).map(|m| m.len()).unwrap_or(0);

        let rel_path = abs_path.strip_prefix(root).unwrap_or(&abs_path).to_path_buf();
        entries.push(FileEntry {
            abs_path,
            rel_path,
            bytes,
        });
    }

    entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(entries)
}
