use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book has no sheets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets.get(name).ok_or_else(|| SheetError::SheetNotFound {
            name: name.to_string(),
        })
    }

    /// Total data rows across all sheets, headers excluded
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sheets.values().map(Sheet::record_count).sum()
    }

    /// Add a sheet under a name
    ///
    /// # Errors
    ///
    /// Returns `SheetError::SheetAlreadyExists` if the name is taken.
    pub fn add_sheet(&mut self, name: &str, mut sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Add a sheet, suffixing the name with _1, _2, ... when it is taken.
    /// Returns the name the sheet was stored under.
    pub fn add_sheet_unique(&mut self, base_name: &str, mut sheet: Sheet) -> String {
        let name = self.unique_name(base_name);
        sheet.set_name(&name);
        self.sheets.insert(name.clone(), sheet);
        name
    }

    fn unique_name(&self, base_name: &str) -> String {
        if !self.has_sheet(base_name) {
            return base_name.to_string();
        }
        let mut suffix = 1;
        loop {
            let new_name = format!("{base_name}_{suffix}");
            if !self.has_sheet(&new_name) {
                return new_name;
            }
            suffix += 1;
        }
    }

    /// Iterate over sheets
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ===== Consolidation =====

    /// Consolidate all sheets into a single sheet by stacking rows vertically.
    ///
    /// Columns are the union of every sheet's columns in first-seen order and
    /// are aligned by name. A sheet missing a column contributes nulls to it.
    /// Sheets with no rows at all contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::ColumnsNotNamed` if a non-empty sheet has no header.
    ///
    /// # Example
    /// ```
    /// use sigmerge_sheet::{Book, Sheet};
    ///
    /// let mut a = Sheet::from_data(vec![vec!["DATE", "V"], vec!["2024-01-02", "1"]]);
    /// a.name_columns_by_row(0).unwrap();
    /// let mut b = Sheet::from_data(vec![vec!["V", "W"], vec!["2", "x"]]);
    /// b.name_columns_by_row(0).unwrap();
    ///
    /// let mut book = Book::new();
    /// book.add_sheet("a", a).unwrap();
    /// book.add_sheet("b", b).unwrap();
    ///
    /// let combined = book.consolidate().unwrap();
    /// assert_eq!(combined.column_names().unwrap(), &vec!["DATE", "V", "W"]);
    /// assert_eq!(combined.record_count(), 2);
    /// ```
    pub fn consolidate(&self) -> Result<Sheet> {
        let mut result = Sheet::with_name("consolidated");

        // Collect all unique column names across all sheets (preserving order)
        let mut all_columns: IndexSet<String> = IndexSet::new();
        for (name, sheet) in self.sheets() {
            if sheet.is_empty() {
                continue;
            }
            let col_names = sheet.column_names().ok_or_else(|| {
                SheetError::ColumnsNotNamed(format!(
                    "Sheet '{name}' does not have named columns. All sheets must have named columns for consolidate."
                ))
            })?;
            for col in col_names {
                all_columns.insert(col.clone());
            }
        }

        if all_columns.is_empty() {
            return Ok(result);
        }

        let header: Vec<CellValue> = all_columns
            .iter()
            .map(|n| CellValue::String(n.clone()))
            .collect();
        result.data_mut().push(header);

        for (_, sheet) in self.sheets() {
            let Some(sheet_col_names) = sheet.column_names() else {
                continue;
            };

            let col_idx: HashMap<&str, usize> = sheet_col_names
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();

            for row in sheet.records() {
                let new_row = all_columns
                    .iter()
                    .map(|col_name| {
                        col_idx
                            .get(col_name.as_str())
                            .and_then(|&idx| row.get(idx))
                            .cloned()
                            .unwrap_or(CellValue::Null)
                    })
                    .collect();
                result.data_mut().push(new_row);
            }
        }

        result.name_columns_by_row(0)?;
        Ok(result)
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}
