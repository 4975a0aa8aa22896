//! Format limits
//!
//! Hard limits of the XLSX format, and the buffer lengths derived from them. The `*_LENGTH`
//! constants follow the C convention of counting a trailing terminator, so a rendered reference
//! always satisfies `text.len() < CONSTANT`.

use crate::error::{ErrorCode, Result};

/// Byte length of `literal` plus a terminator
const fn sized(literal: &str) -> usize {
    literal.len() + 1
}

/// Number of rows in a worksheet
pub const ROW_MAX: u32 = 1_048_576;

/// Number of columns in a worksheet
pub const COL_MAX: u16 = 16_384;

/// Size of an MD5 digest in bytes
pub const MD5_SIZE: usize = 16;

/// Maximum sheet name length in characters
pub const SHEETNAME_MAX: usize = 31;

/// Encoded sheet name: 4 UTF-8 bytes per character, two quotes and a terminator
pub const MAX_SHEETNAME_LENGTH: usize = SHEETNAME_MAX * 4 + 2 + 1;

/// Longest column reference
pub const MAX_COL_NAME_LENGTH: usize = sized("$XFD");

/// Longest row reference
pub const MAX_ROW_NAME_LENGTH: usize = sized("$1048576");

/// Longest single-cell reference
pub const MAX_CELL_NAME_LENGTH: usize = sized("$XFWD$1048576");

/// Longest range reference, `$XFWD$1048576:$XFWD$1048576`
pub const MAX_CELL_RANGE_LENGTH: usize = MAX_CELL_NAME_LENGTH * 2;

/// Longest sheet-qualified range, `'Sheet1'!$A$1:$C$5`
pub const MAX_FORMULA_RANGE_LENGTH: usize = MAX_SHEETNAME_LENGTH + MAX_CELL_RANGE_LENGTH;

/// ISO-8601 timestamp, `2016-12-12T23:00:00Z`
pub const DATETIME_LENGTH: usize = sized("2016-12-12T23:00:00Z");

/// Braced GUID with its embedded terminator
pub const GUID_LENGTH: usize = sized("{12345678-1234-1234-1234-1234567890AB}\0");

/// Decimal rendering of any `u32`
pub const UINT32_T_LENGTH: usize = sized("4294967296");

/// Maximum file name length
pub const FILENAME_LENGTH: usize = 128;

/// Maximum characters in a cell string
pub const MAX_STRING_LENGTH: usize = 32_767;

/// Maximum characters in a document property name or string value
pub const MAX_PROPERTY_LENGTH: usize = 255;

/// Maximum hyperlink length in characters
pub const MAX_URL_LENGTH: usize = 2079;

/// Maximum hyperlinks per worksheet
pub const MAX_NUMBER_URLS: usize = 65_530;

/// Microsoft Office relationship namespace
pub const SCHEMA_MS: &str = "http://schemas.microsoft.com/office/2006/relationships";
/// Root of the OOXML schema namespaces
pub const SCHEMA_ROOT: &str = "http://schemas.openxmlformats.org";
/// DrawingML namespace
pub const SCHEMA_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006";
/// Office document namespace
pub const SCHEMA_OFFICEDOC: &str = "http://schemas.openxmlformats.org/officeDocument/2006";
/// Package relationships namespace
pub const SCHEMA_PACKAGE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
/// Office document relationships namespace
pub const SCHEMA_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Content types namespace, used by `[Content_Types].xml`
pub const SCHEMA_CONTENT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Character limits that have their own error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthLimit {
    /// 32 characters, e.g. data validation list items
    Chars32,
    /// 128 characters
    Chars128,
    /// 255 characters, e.g. document properties
    Chars255,
    /// 32,767 characters, cell strings
    MaxString,
}

impl LengthLimit {
    /// Maximum number of characters allowed
    pub fn chars(self) -> usize {
        match self {
            LengthLimit::Chars32 => 32,
            LengthLimit::Chars128 => 128,
            LengthLimit::Chars255 => MAX_PROPERTY_LENGTH,
            LengthLimit::MaxString => MAX_STRING_LENGTH,
        }
    }

    /// Error returned when the limit is exceeded
    pub fn error(self) -> ErrorCode {
        match self {
            LengthLimit::Chars32 => ErrorCode::StringLengthExceeded32,
            LengthLimit::Chars128 => ErrorCode::StringLengthExceeded128,
            LengthLimit::Chars255 => ErrorCode::StringLengthExceeded255,
            LengthLimit::MaxString => ErrorCode::MaxStringLengthExceeded,
        }
    }

    /// Check `value` against the limit, counting characters rather than bytes
    pub fn check(self, value: &str) -> Result<()> {
        if exceeds(value, self.chars()) {
            Err(self.error())
        } else {
            Ok(())
        }
    }
}

/// Whether `value` has more than `max` characters, without counting past `max`
fn exceeds(value: &str, max: usize) -> bool {
    // Every char takes at least one byte.
    value.len() > max && value.chars().nth(max).is_some()
}

/// Check a string against [`MAX_STRING_LENGTH`]
pub fn check_string_length(value: &str) -> Result<()> {
    LengthLimit::MaxString.check(value)
}

/// Check a zero-based row/column pair against the grid
pub fn check_dimensions(row: u32, col: u16) -> Result<()> {
    if row >= ROW_MAX || col >= COL_MAX {
        return Err(ErrorCode::WorksheetIndexOutOfRange);
    }
    Ok(())
}

/// Check a hyperlink before adding it to a worksheet that already has `existing` links
pub fn check_url(url: &str, existing: usize) -> Result<()> {
    if url.is_empty() {
        return Err(ErrorCode::ParameterIsEmpty);
    }
    if exceeds(url, MAX_URL_LENGTH) {
        return Err(ErrorCode::WorksheetMaxUrlLengthExceeded);
    }
    if existing >= MAX_NUMBER_URLS {
        return Err(ErrorCode::WorksheetMaxNumberUrlsExceeded);
    }
    Ok(())
}
