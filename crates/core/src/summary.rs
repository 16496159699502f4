//! Run results.

use std::path::PathBuf;

/// What a completed merge produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of input workbooks read
    pub files_processed: usize,
    /// Data rows in the output, header excluded
    pub total_rows: usize,
    /// Where the output workbook was written
    pub output_path: PathBuf,
    /// Whether the rows were sorted by the date column
    pub sorted: bool,
    /// A1 names of cells skipped while sizing columns
    pub unmeasured_cells: Vec<String>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No file matched the pattern; nothing was written.
    NoInputFiles,
    /// Inputs were merged and written.
    Merged(MergeSummary),
}
