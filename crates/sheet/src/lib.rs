//! Sheet/Book model for sigmerge
//!
//! Provides an in-memory table model for spreadsheet data, reading of `.xlsx`
//! files, union-of-columns consolidation of many sheets, stable sorting by a
//! named column, and styled `.xlsx` output (column widths, borders, fill,
//! auto-filter).
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use sigmerge_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["DATE", "SYMBOL", "PRICE"],
//!     vec!["2024-01-02", "EURUSD", "1.0950"],
//!     vec!["2024-01-01", "GBPUSD", "1.2710"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 3);
//! assert_eq!(sheet.col_count(), 3);
//! ```
//!
//! ## Sorting by a named column
//!
//! ```
//! use sigmerge_sheet::Sheet;
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["DATE", "V"],
//!     vec!["2024-01-02", "1"],
//!     vec!["2024-01-01", "2"],
//! ]);
//! sheet.name_columns_by_row(0).unwrap();
//! sheet.sort_by_column("DATE").unwrap();
//!
//! assert_eq!(sheet.get_by_name(1, "V").unwrap().as_str(), "2");
//! ```
//!
//! ## Loading and saving
//!
//! ```no_run
//! use sigmerge_sheet::{Sheet, XlsxReadOptions, XlsxWriteOptions};
//!
//! let sheet = Sheet::from_xlsx_with_options(
//!     "data/signal_mt_stop_1.xlsx",
//!     XlsxReadOptions::default().with_headers(true),
//! ).unwrap();
//! let layout = sheet
//!     .save_as_xlsx_with_options("out.xlsx", &XlsxWriteOptions::default())
//!     .unwrap();
//! println!("column widths: {:?}", layout.widths);
//! ```

mod a1_notation;
mod book;
mod cell;
mod datetime;
mod error;
mod layout;
mod sheet;
mod xlsx;

/// Re-export A1 helpers.
pub use a1_notation::{cell_name, column_letters};
/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::{CellValue, DATETIME_DISPLAY_FORMAT};
/// Re-export Excel date conversion.
pub use datetime::datetime_to_excel_serial;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export write layout types.
pub use layout::{CellExtent, SheetLayout};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export XLSX options.
pub use xlsx::{XlsxReadOptions, XlsxWriteOptions};
