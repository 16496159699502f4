//! # sigmerge-core
//!
//! Merges every `data/signal_mt_stop_*.xlsx` workbook into one timestamped,
//! formatted workbook sorted by its `DATE` column.
//!
//! This crate provides:
//! - The fixed run configuration
//! - Input discovery
//! - The load → combine → sort → export pipeline
//! - Error and result types

/// Run configuration and its fixed defaults.
pub mod config;
/// Input file discovery.
pub mod discover;
/// Error types and result aliases.
pub mod error;
/// Pipeline stages and the `run` entry point.
pub mod pipeline;
/// Run results.
pub mod summary;

pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use pipeline::{run, run_at};
pub use summary::{MergeOutcome, MergeSummary};
