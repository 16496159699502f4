use crate::a1_notation::cell_name;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;

/// Bottom-right corner of the populated rectangle, 0-based, in xlsx index types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellExtent {
    pub last_row: u32,
    pub last_col: u16,
}

/// Column widths and populated range computed before a sheet is written
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Width per column: longest displayed value (header included) plus padding
    pub widths: Vec<f64>,
    /// A1 names of cells skipped while measuring
    pub unmeasured: Vec<String>,
    /// `None` when the sheet has no populated cells
    pub extent: Option<CellExtent>,
}

impl SheetLayout {
    /// Measure every column of a sheet.
    ///
    /// A cell whose value has no textual form does not fail the measurement;
    /// it is logged, recorded in `unmeasured` and ignored for its column.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Overflow` if the sheet exceeds xlsx row/column indexing.
    pub fn measure(sheet: &Sheet, padding: f64) -> Result<Self> {
        let rows = sheet.row_count();
        let cols = sheet.col_count();

        let extent = if rows == 0 || cols == 0 {
            None
        } else {
            Some(CellExtent {
                last_row: u32::try_from(rows - 1)
                    .map_err(|_| SheetError::Overflow(format!("{rows} rows")))?,
                last_col: u16::try_from(cols - 1)
                    .map_err(|_| SheetError::Overflow(format!("{cols} columns")))?,
            })
        };

        let mut widths = Vec::with_capacity(cols);
        let mut unmeasured = Vec::new();

        for col in 0..cols {
            let mut max_len = 0;
            for row in 0..rows {
                let cell = sheet.cell_or_null(row, col);
                match cell.display_width() {
                    Some(len) => max_len = max_len.max(len),
                    None => {
                        let name = cell_name(row, col);
                        let err = SheetError::Unmeasurable {
                            cell: name.clone(),
                            reason: format!("no display form for {cell:?}"),
                        };
                        tracing::warn!("Error processing cell {}: {}", name, err);
                        unmeasured.push(name);
                    }
                }
            }
            widths.push(max_len as f64 + padding);
        }

        Ok(SheetLayout {
            widths,
            unmeasured,
            extent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn named(data: Vec<Vec<CellValue>>) -> Sheet {
        let mut sheet = Sheet::new();
        *sheet.data_mut() = data;
        sheet.name_columns_by_row(0).unwrap();
        sheet
    }

    #[test]
    fn test_widths_include_header() {
        let sheet = named(vec![
            vec!["DATE".into(), "LONG_HEADER".into()],
            vec!["2024-01-01 long".into(), 1.into()],
        ]);

        let layout = SheetLayout::measure(&sheet, 2.0).unwrap();

        assert_eq!(layout.widths, vec![17.0, 13.0]);
        assert!(layout.unmeasured.is_empty());
        assert_eq!(
            layout.extent,
            Some(CellExtent {
                last_row: 1,
                last_col: 1
            })
        );
    }

    #[test]
    fn test_unmeasurable_cell_is_skipped() {
        let sheet = named(vec![
            vec!["A".into(), "B".into()],
            vec![CellValue::Float(f64::NAN), "xyz".into()],
            vec![CellValue::Float(12.5), "x".into()],
        ]);

        let layout = SheetLayout::measure(&sheet, 2.0).unwrap();

        assert_eq!(layout.unmeasured, vec!["A2".to_string()]);
        assert_eq!(layout.widths, vec![6.0, 5.0]);
    }

    #[test]
    fn test_integral_floats_measure_with_decimal() {
        let sheet = named(vec![
            vec!["P".into()],
            vec![CellValue::Float(1.5)],
            vec![CellValue::Float(1000.0)],
        ]);

        let layout = SheetLayout::measure(&sheet, 2.0).unwrap();

        // "1000.0"
        assert_eq!(layout.widths, vec![8.0]);
    }

    #[test]
    fn test_empty_sheet_has_no_extent() {
        let layout = SheetLayout::measure(&Sheet::new(), 2.0).unwrap();
        assert!(layout.widths.is_empty());
        assert_eq!(layout.extent, None);
    }

    #[test]
    fn test_null_column_gets_padding_only() {
        let sheet = Sheet::from_data(vec![vec![CellValue::Null], vec![CellValue::Null]]);
        let layout = SheetLayout::measure(&sheet, 2.0).unwrap();
        assert_eq!(layout.widths, vec![2.0]);
    }
}
