use std::path::PathBuf;
use thiserror::Error;

use crate::symbols::SourceUnit;

/// A source unit that is not syntactically valid JavaScript.
///
/// Always recovered per unit: the driver logs it and moves on.
#[derive(Debug, Clone, Error)]
#[error("failed to parse {unit}: {message}")]
pub struct ParseError {
    pub unit: SourceUnit,
    pub message: String,
}

/// An external script that could not be retrieved.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub message: String,
}

/// Root-level scan failures. These are the only fatal errors of a batch run and are
/// raised before any unit is processed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cannot enumerate {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },
}
