use crate::cell::CellValue;
use crate::datetime::{datetime_to_excel_serial, parse_iso_datetime};
use crate::error::{Result, SheetError};
use crate::layout::SheetLayout;
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Options for reading Excel files
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Whether the first row contains headers
    pub has_headers: bool,
}

impl XlsxReadOptions {
    /// Set whether the first row contains headers
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Options for writing a styled Excel file
#[derive(Debug, Clone)]
pub struct XlsxWriteOptions {
    /// Characters added to each column's longest value (default: 2)
    pub width_padding: f64,
    /// Solid background fill applied to every populated cell (default: white)
    pub fill_color: u32,
    /// Number format for date-time cells
    pub datetime_format: String,
}

impl Default for XlsxWriteOptions {
    fn default() -> Self {
        Self {
            width_padding: 2.0,
            fill_color: 0xFF_FF_FF,
            datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }
}

impl XlsxWriteOptions {
    /// Set the column width padding
    #[must_use]
    pub fn with_width_padding(mut self, padding: f64) -> Self {
        self.width_padding = padding;
        self
    }

    /// Thin border on all four sides over a solid fill
    fn cell_format(&self) -> Format {
        Format::new()
            .set_border(FormatBorder::Thin)
            .set_background_color(Color::RGB(self.fill_color))
            .set_pattern(FormatPattern::Solid)
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // as_datetime honours the workbook's 1900/1904 epoch
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => {
            parse_iso_datetime(s).map_or_else(|| CellValue::String(s.clone()), CellValue::DateTime)
        }
        Data::DurationIso(s) => CellValue::String(s.clone()),
        // Error cells (#DIV/0!, #N/A, ...) load as missing numbers
        Data::Error(_) => CellValue::Float(f64::NAN),
    }
}

/// Turn a raw header row into unique column names.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ... appended.
fn unique_header(row: &[CellValue]) -> Vec<CellValue> {
    let mut seen: HashSet<String> = HashSet::new();
    row.iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell.as_str() {
                s if s.trim().is_empty() => format!("Unnamed: {i}"),
                s => s,
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            CellValue::String(name)
        })
        .collect()
}

impl Sheet {
    /// Load a sheet from an Excel file (first sheet)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_xlsx_with_options(path, XlsxReadOptions::default())
    }

    /// Load the first sheet of an Excel file with options
    ///
    /// With `has_headers`, the first row is normalised into unique column
    /// names and the columns are named by it.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx_with_options<P: AsRef<Path>>(path: P, options: XlsxReadOptions) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(Sheet::new());
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut data: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        if options.has_headers {
            if let Some(header) = data.first_mut() {
                *header = unique_header(header);
            }
        }

        let mut sheet = Sheet::with_name(&sheet_name);
        *sheet.data_mut() = data;

        if options.has_headers && sheet.row_count() > 0 {
            sheet.name_columns_by_row(0)?;
        }

        Ok(sheet)
    }

    /// Save the sheet to an Excel file with default styling
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<SheetLayout> {
        self.save_as_xlsx_with_options(path, &XlsxWriteOptions::default())
    }

    /// Save the sheet to an Excel file, styled per `options`.
    ///
    /// Every cell in the populated rectangle is written with the same
    /// border/fill format, blanks included. Columns are sized from
    /// [`SheetLayout::measure`]. The workbook is saved once, after all
    /// formatting is in place.
    ///
    /// # Errors
    ///
    /// Returns error if the sheet is too large for xlsx or the file cannot be written.
    pub fn save_as_xlsx_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: &XlsxWriteOptions,
    ) -> Result<SheetLayout> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.name())?;

        let layout = SheetLayout::measure(self, options.width_padding)?;

        tracing::info!("- Writing data to Excel with borders and fill...");
        self.write_to_worksheet(worksheet, &layout, options)?;

        tracing::info!("- Adjusting column widths...");
        for (col, width) in layout.widths.iter().enumerate() {
            let col =
                u16::try_from(col).map_err(|_| SheetError::Overflow(format!("column {col}")))?;
            worksheet.set_column_width(col, *width)?;
        }

        if let Some(extent) = layout.extent {
            tracing::info!("- Adding auto-filter...");
            worksheet.autofilter(0, 0, extent.last_row, extent.last_col)?;
        }

        workbook.save(path.as_ref())?;
        Ok(layout)
    }

    /// Write every cell of the populated rectangle with its style
    fn write_to_worksheet(
        &self,
        worksheet: &mut Worksheet,
        layout: &SheetLayout,
        options: &XlsxWriteOptions,
    ) -> Result<()> {
        let Some(extent) = layout.extent else {
            return Ok(());
        };

        let format = options.cell_format();
        let date_format = options.cell_format().set_num_format(&options.datetime_format);

        for row_num in 0..=extent.last_row {
            for col_num in 0..=extent.last_col {
                let cell = self.cell_or_null(row_num as usize, usize::from(col_num));
                match cell {
                    CellValue::Null => {
                        worksheet.write_blank(row_num, col_num, &format)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean_with_format(row_num, col_num, *b, &format)?;
                    }
                    CellValue::Int(i) => {
                        // Note: Excel stores all numbers as f64, so integers > 2^53
                        // (9,007,199,254,740,992) may lose precision
                        worksheet.write_number_with_format(row_num, col_num, *i as f64, &format)?;
                    }
                    CellValue::Float(f) if !f.is_finite() => {
                        worksheet.write_blank(row_num, col_num, &format)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number_with_format(row_num, col_num, *f, &format)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string_with_format(row_num, col_num, s, &format)?;
                    }
                    CellValue::DateTime(dt) => {
                        let serial = datetime_to_excel_serial(*dt);
                        worksheet.write_number_with_format(row_num, col_num, serial, &date_format)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");

        let sheet = Sheet::from_data(vec![
            vec!["Name", "Age", "Active"],
            vec!["Alice", "30", "true"],
            vec!["Bob", "25", "false"],
        ]);

        sheet.save_as_xlsx(&path).unwrap();

        let loaded = Sheet::from_xlsx(&path).unwrap();

        assert_eq!(loaded.row_count(), 3);
        assert_eq!(loaded.col_count(), 3);
        assert!(loaded.column_names().is_none());
    }

    #[test]
    fn test_xlsx_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");
        let when = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let mut sheet = Sheet::new();
        *sheet.data_mut() = vec![vec![
            CellValue::String("text".to_string()),
            CellValue::Int(42),
            CellValue::Float(3.25),
            CellValue::Bool(true),
            CellValue::DateTime(when),
            CellValue::Float(f64::NAN),
        ]];

        sheet.save_as_xlsx(&path).unwrap();

        let loaded = Sheet::from_xlsx(&path).unwrap();

        assert_eq!(loaded.row_count(), 1);
        assert!(matches!(loaded.get(0, 0).unwrap(), CellValue::String(s) if s == "text"));
        // Int becomes Float in Excel
        assert!(matches!(loaded.get(0, 1).unwrap(), CellValue::Float(f) if (*f - 42.0).abs() < 0.01));
        assert!(matches!(loaded.get(0, 2).unwrap(), CellValue::Float(f) if (*f - 3.25).abs() < 0.01));
        assert!(matches!(loaded.get(0, 3).unwrap(), CellValue::Bool(true)));
        assert_eq!(loaded.get(0, 4).unwrap(), &CellValue::DateTime(when));
        // Non-finite numbers are written as styled blanks
        assert_eq!(loaded.cell_or_null(0, 5), &CellValue::Null);
    }

    #[test]
    fn test_xlsx_with_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("headers.xlsx");

        let sheet = Sheet::from_data(vec![
            vec!["Name", "Age", "City"],
            vec!["Alice", "30", "NYC"],
            vec!["Bob", "25", "LA"],
        ]);
        sheet.save_as_xlsx(&path).unwrap();

        let with_headers =
            Sheet::from_xlsx_with_options(&path, XlsxReadOptions::default().with_headers(true))
                .unwrap();

        let names = with_headers.column_names().unwrap();
        assert_eq!(names, &vec!["Name", "Age", "City"]);
        assert_eq!(with_headers.record_count(), 2);
        assert_eq!(with_headers.get_by_name(2, "City").unwrap().as_str(), "LA");
    }

    #[test]
    fn test_unique_header() {
        let header = unique_header(&[
            CellValue::from("A"),
            CellValue::Null,
            CellValue::from("A"),
            CellValue::from("A"),
            CellValue::from("  "),
        ]);
        let names: Vec<String> = header.iter().map(CellValue::as_str).collect();
        assert_eq!(names, vec!["A", "Unnamed: 1", "A.1", "A.2", "Unnamed: 4"]);
    }

    #[test]
    fn test_save_returns_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.xlsx");

        let mut sheet = Sheet::from_data(vec![vec!["DATE", "V"], vec!["2024-01-01", "value"]]);
        sheet.name_columns_by_row(0).unwrap();
        sheet.set_name("signal_mt_stop");

        let layout = sheet
            .save_as_xlsx_with_options(&path, &XlsxWriteOptions::default().with_width_padding(2.0))
            .unwrap();

        assert_eq!(layout.widths, vec![12.0, 7.0]);
        assert!(path.exists());

        let workbook: Xlsx<BufReader<File>> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["signal_mt_stop".to_string()]);
    }

    #[test]
    fn test_too_many_columns_is_overflow() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.xlsx");

        let mut sheet = Sheet::new();
        *sheet.data_mut() = vec![vec![CellValue::Int(1); usize::from(u16::MAX) + 2]];

        let result = sheet.save_as_xlsx(&path);

        assert!(matches!(result, Err(SheetError::Overflow(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_sheet_saves() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        let layout = Sheet::new().save_as_xlsx(&path).unwrap();

        assert_eq!(layout.extent, None);
        assert!(path.exists());
    }
}
