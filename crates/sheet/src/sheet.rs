use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::HashMap;

static NULL_CELL: CellValue = CellValue::Null;

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// Once columns are named, row 0 of the data is the header row and every
/// following row is a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    column_names: Option<Vec<String>>,
    column_index: Option<HashMap<String, usize>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
            column_names: None,
            column_index: None,
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            data: converted,
            ..Self::new()
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    ///
    /// Named sheets report the header width; otherwise the widest row wins.
    #[must_use]
    pub fn col_count(&self) -> usize {
        match &self.column_names {
            Some(names) => names.len(),
            None => self.data.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of data rows, not counting the header row
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.data.len().saturating_sub(self.header_offset())
    }

    fn header_offset(&self) -> usize {
        usize::from(self.column_names.is_some() && !self.data.is_empty())
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value by row index and column name
    pub fn get_by_name(&self, row: usize, col_name: &str) -> Result<&CellValue> {
        let col = self.column_index_by_name(col_name)?;
        self.get(row, col)
    }

    /// Cell at (row, col), treating cells past the end of a short row as null
    #[must_use]
    pub fn cell_or_null(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&NULL_CELL)
    }

    // ===== Row Operations =====

    /// Get an entire row by index (0-based)
    pub fn row(&self, index: usize) -> Result<&Vec<CellValue>> {
        self.data.get(index).ok_or(SheetError::RowIndexOutOfBounds {
            index,
            count: self.row_count(),
        })
    }

    /// Iterate over data rows, skipping the header row when columns are named
    pub fn records(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter().skip(self.header_offset())
    }

    /// Get mutable access to the underlying data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    // ===== Named Access =====

    /// Use the specified row as column headers
    ///
    /// # Errors
    ///
    /// Returns `SheetError::DuplicateColumnName` if the header row contains duplicate names.
    pub fn name_columns_by_row(&mut self, row_index: usize) -> Result<()> {
        let header_row = self.row(row_index)?;
        let names: Vec<String> = header_row.iter().map(CellValue::as_str).collect();

        let mut index_map = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            if index_map.contains_key(name) {
                return Err(SheetError::DuplicateColumnName { name: name.clone() });
            }
            index_map.insert(name.clone(), i);
        }

        self.column_names = Some(names);
        self.column_index = Some(index_map);
        Ok(())
    }

    /// Get column names (if set)
    #[must_use]
    pub fn column_names(&self) -> Option<&Vec<String>> {
        self.column_names.as_ref()
    }

    /// Whether a column with exactly this name exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index
            .as_ref()
            .is_some_and(|index| index.contains_key(name))
    }

    /// Get the column index by name
    fn column_index_by_name(&self, name: &str) -> Result<usize> {
        self.column_index
            .as_ref()
            .ok_or_else(|| {
                SheetError::ColumnsNotNamed("Call name_columns_by_row() first".to_string())
            })?
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Get an entire column by name, header cell included
    pub fn column_by_name(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self.column_index_by_name(name)?;
        Ok(self
            .data
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    // ===== Sorting =====

    /// Stable ascending sort of the data rows by a named column.
    ///
    /// The header row stays in place. Rows with equal keys keep their
    /// relative order; missing values go last (see [`CellValue::sort_cmp`]).
    ///
    /// # Errors
    ///
    /// Returns `SheetError::ColumnNotFound` if the column does not exist.
    pub fn sort_by_column(&mut self, name: &str) -> Result<()> {
        let index = self.column_index_by_name(name)?;
        let start = self.header_offset();

        self.data[start..].sort_by(|a, b| {
            let left = a.get(index).unwrap_or(&NULL_CELL);
            let right = b.get(index).unwrap_or(&NULL_CELL);
            left.sort_cmp(right)
        });
        Ok(())
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
