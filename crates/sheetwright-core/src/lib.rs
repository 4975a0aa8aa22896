//! # sheetwright-core
//!
//! Shared data model for the sheetwright XLSX writer.
//!
//! This crate provides the values and rules every writer component builds on:
//! - [`ErrorCode`] - The closed set of failure codes, and [`strerror`]
//! - [`diagnostics`] - Injectable warning/error reporting
//! - [`limits`] - Format limits and buffer lengths for names and references
//! - [`validate_sheet_name`] and [`SheetNames`] - Worksheet naming rules
//! - [`DateTime`] - Calendar values, Excel serial dates and ISO-8601 timestamps
//! - [`CustomProperty`] and [`CustomProperties`] - Typed document properties
//! - [`endian`] - Host/network byte order for binary payloads
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_core::{cell_ref, CustomProperties, DateTime, ErrorCode, SheetNames};
//!
//! let mut sheets = SheetNames::new();
//! sheets.register("Sheet1").unwrap();
//! assert_eq!(sheets.register("sheet1"), Err(ErrorCode::SheetnameAlreadyUsed));
//!
//! let mut props = CustomProperties::new();
//! props.set("Author", "Jane").unwrap();
//! props.set("Reviewed", DateTime::date(2016, 12, 12)).unwrap();
//!
//! assert_eq!(cell_ref::formula_range("Sheet1", 0, 0, 4, 2).unwrap(), "Sheet1!$A$1:$C$5");
//! ```

pub mod cell_ref;
pub mod datetime;
pub mod diagnostics;
pub mod endian;
pub mod error;
pub mod limits;
pub mod property;
pub mod sheet_name;

// Re-exports for convenience
pub use cell_ref::{ColIndex, RowIndex};
pub use datetime::{DateEpoch, DateTime};
pub use diagnostics::{LogReporter, MemoryReporter, Reporter, Severity};
pub use error::{strerror, ErrorClass, ErrorCode, Result};
pub use property::{
    CustomProperties, CustomProperty, KeyValue, KeyValueList, PropertyKind, PropertyValue,
};
pub use sheet_name::{quote_sheet_name, validate_sheet_name, SheetNames};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = limits::ROW_MAX;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = limits::COL_MAX;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = limits::SHEETNAME_MAX;
