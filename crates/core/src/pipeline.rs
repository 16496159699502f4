//! The merge pipeline: discover, load, combine, sort, export.

use crate::config::{MergeConfig, TIMESTAMP_FORMAT};
use crate::discover::discover_inputs;
use crate::error::{MergeError, MergeResult};
use crate::summary::{MergeOutcome, MergeSummary};
use chrono::{Local, NaiveDateTime};
use sigmerge_sheet::{Book, Sheet, SheetLayout, XlsxReadOptions, XlsxWriteOptions};
use std::path::{Path, PathBuf};

/// Run the merge with the current local time as the output timestamp.
pub fn run(config: &MergeConfig) -> MergeResult<MergeOutcome> {
    run_at(config, Local::now().naive_local())
}

/// Run the merge, stamping the output file with `now`.
///
/// Returns `MergeOutcome::NoInputFiles` without touching the filesystem when
/// nothing matches. Any load or write failure ends the run.
pub fn run_at(config: &MergeConfig, now: NaiveDateTime) -> MergeResult<MergeOutcome> {
    let inputs = discover_inputs(config)?;
    if inputs.is_empty() {
        tracing::debug!(dir = %config.data_dir.display(), "no input files matched");
        return Ok(MergeOutcome::NoInputFiles);
    }
    tracing::info!("Found {} files to process", inputs.len());

    let book = load_inputs(&inputs)?;
    let mut combined = combine(&book, &config.sheet_name)?;
    let sorted = sort_by_date(&mut combined, &config.date_column)?;

    let output_path = output_path(config, now);
    let layout = export(&combined, &output_path, config)?;

    Ok(MergeOutcome::Merged(MergeSummary {
        files_processed: inputs.len(),
        total_rows: combined.record_count(),
        output_path,
        sorted,
        unmeasured_cells: layout.unmeasured,
    }))
}

/// Read every input workbook, in order, into a book with one sheet per file.
pub fn load_inputs(paths: &[PathBuf]) -> MergeResult<Book> {
    let mut book = Book::with_name("inputs");
    let total = paths.len();
    let mut running = 0;

    for (idx, path) in paths.iter().enumerate() {
        tracing::info!("Processing file {}/{}: {}", idx + 1, total, file_label(path));

        let sheet = Sheet::from_xlsx_with_options(path, XlsxReadOptions::default().with_headers(true))
            .map_err(|source| MergeError::Load {
                path: path.clone(),
                source,
            })?;

        let rows = sheet.record_count();
        running += rows;
        tracing::info!("- Rows in file: {}", rows);
        tracing::info!("- Total combined rows so far: {}", running);

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("file{}", idx + 1));
        book.add_sheet_unique(&stem, sheet);
    }

    Ok(book)
}

/// Stack all loaded sheets into one table with the union of their columns.
pub fn combine(book: &Book, sheet_name: &str) -> MergeResult<Sheet> {
    let mut combined = book.consolidate()?;
    combined.set_name(sheet_name);
    tracing::debug!(
        rows = combined.record_count(),
        cols = combined.col_count(),
        "combined inputs"
    );
    Ok(combined)
}

/// Sort rows by `column` when the table has it. Returns whether it sorted.
pub fn sort_by_date(sheet: &mut Sheet, column: &str) -> MergeResult<bool> {
    tracing::info!("Sorting data by {} column...", column);
    if !sheet.has_column(column) {
        tracing::debug!(column, "sort column absent, keeping input order");
        return Ok(false);
    }
    sheet.sort_by_column(column)?;
    Ok(true)
}

/// Build `<data_dir>/<prefix><YYYY-MM-DD_HH-MM-SS>.xlsx`.
#[must_use]
pub fn output_path(config: &MergeConfig, now: NaiveDateTime) -> PathBuf {
    config.data_dir.join(format!(
        "{}{}.xlsx",
        config.output_prefix,
        now.format(TIMESTAMP_FORMAT)
    ))
}

/// Write the table as a styled workbook at `path`.
pub fn export(sheet: &Sheet, path: &Path, config: &MergeConfig) -> MergeResult<SheetLayout> {
    tracing::info!("Exporting combined data to: {}", path.display());
    let options = XlsxWriteOptions::default().with_width_padding(config.width_padding);
    sheet
        .save_as_xlsx_with_options(path, &options)
        .map_err(|source| MergeError::Export {
            path: path.to_path_buf(),
            source,
        })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sigmerge_sheet::CellValue;

    fn named(data: Vec<Vec<CellValue>>) -> Sheet {
        let mut sheet = Sheet::new();
        *sheet.data_mut() = data;
        sheet.name_columns_by_row(0).unwrap();
        sheet
    }

    #[test]
    fn test_output_path_format() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        let path = output_path(&MergeConfig::default(), now);
        assert_eq!(
            path,
            PathBuf::from("data/all_signal_mt_stop_2024-03-05_07-08-09.xlsx")
        );
    }

    #[test]
    fn test_sort_by_date_present() {
        let mut sheet = named(vec![
            vec!["DATE".into(), "V".into()],
            vec!["2024-01-02".into(), 1.into()],
            vec!["2024-01-01".into(), 2.into()],
        ]);
        assert!(sort_by_date(&mut sheet, "DATE").unwrap());
        assert_eq!(sheet.get_by_name(1, "V").unwrap(), &CellValue::Int(2));
    }

    #[test]
    fn test_sort_by_date_absent_passes_through() {
        let mut sheet = named(vec![
            vec!["date".into(), "V".into()],
            vec!["2024-01-02".into(), 1.into()],
            vec!["2024-01-01".into(), 2.into()],
        ]);
        let before = sheet.clone();
        assert!(!sort_by_date(&mut sheet, "DATE").unwrap());
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_combine_names_sheet() {
        let mut book = Book::new();
        book.add_sheet("a", named(vec![vec!["A".into()], vec![1.into()]]))
            .unwrap();
        let combined = combine(&book, "signal_mt_stop").unwrap();
        assert_eq!(combined.name(), "signal_mt_stop");
        assert_eq!(combined.record_count(), 1);
    }

    #[test]
    fn test_load_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("signal_mt_stop_bad.xlsx");
        std::fs::write(&bad, b"garbage").unwrap();

        match load_inputs(&[bad.clone()]) {
            Err(MergeError::Load { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected load error, got {other:?}"),
        }
    }
}
