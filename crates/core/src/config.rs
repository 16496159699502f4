//! Fixed run configuration.

use std::path::{Path, PathBuf};

/// Directory searched for inputs and receiving the output file.
pub const DEFAULT_DATA_DIR: &str = "data";
/// File name glob selecting input workbooks.
pub const DEFAULT_PATTERN: &str = "signal_mt_stop_*.xlsx";
/// Output file name prefix; the run timestamp and `.xlsx` follow it.
pub const DEFAULT_OUTPUT_PREFIX: &str = "all_signal_mt_stop_";
/// Name of the single sheet in the output workbook.
pub const DEFAULT_SHEET_NAME: &str = "signal_mt_stop";
/// Column used as the sort key when present.
pub const DEFAULT_DATE_COLUMN: &str = "DATE";
/// Characters added to each column's longest value.
pub const DEFAULT_WIDTH_PADDING: f64 = 2.0;
/// Timestamp format embedded in the output file name.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Settings for one merge run.
///
/// `MergeConfig::default()` is the only configuration the binary uses; the
/// builder methods exist so the pipeline can be pointed at other directories.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    pub data_dir: PathBuf,
    pub pattern: String,
    pub output_prefix: String,
    pub sheet_name: String,
    pub date_column: String,
    pub width_padding: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            width_padding: DEFAULT_WIDTH_PADDING,
        }
    }
}

impl MergeConfig {
    /// Use a different data directory
    #[must_use]
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Use a different input file pattern
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    /// Use a different sort column
    #[must_use]
    pub fn with_date_column(mut self, column: &str) -> Self {
        self.date_column = column.to_string();
        self
    }
}
