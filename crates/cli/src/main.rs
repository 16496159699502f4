//! # sigmerge-cli
//!
//! Merges `data/signal_mt_stop_*.xlsx` into one dated, formatted workbook.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sigmerge_core::{MergeConfig, MergeOutcome, MergeSummary};
use tracing_subscriber::EnvFilter;

/// sigmerge - combine stop-signal workbooks into one sorted report
#[derive(Parser)]
#[command(name = "sigmerge")]
#[command(author, version, about = "Merge signal_mt_stop workbooks", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = MergeConfig::default();
    let outcome = sigmerge_core::run(&config).with_context(|| {
        format!(
            "Failed to merge {} files in {}",
            config.pattern,
            config.data_dir.display()
        )
    })?;

    match outcome {
        MergeOutcome::NoInputFiles => {
            println!("No matching Excel files found in data directory");
        }
        MergeOutcome::Merged(summary) => print_summary(&summary),
    }

    Ok(())
}

/// Print the final report for a completed merge.
fn print_summary(summary: &MergeSummary) {
    println!();
    println!("{}", "Process completed successfully!".green().bold());
    println!("Total files processed: {}", summary.files_processed);
    println!("Total rows in combined file: {}", summary.total_rows);
    println!("Output file: {}", summary.output_path.display());

    if !summary.unmeasured_cells.is_empty() {
        println!(
            "{} {} cell(s) were skipped while sizing columns",
            "Warning:".yellow().bold(),
            summary.unmeasured_cells.len()
        );
    }
}
