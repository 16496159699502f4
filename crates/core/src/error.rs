//! Error types for sigmerge.

use sigmerge_sheet::SheetError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that end a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The discovery glob could not be compiled.
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A directory entry could not be read while matching files.
    #[error("File discovery failed: {0}")]
    Discovery(#[from] glob::GlobError),

    /// An input file could not be opened or parsed.
    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    /// The output workbook could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    /// Any other sheet operation failure.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}
