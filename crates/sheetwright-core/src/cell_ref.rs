//! A1-style cell and range references
//!
//! Rows and columns are zero-based everywhere in the crate and rendered one-based. Every
//! renderer checks its indices against the grid first, so the output always fits the buffer
//! lengths in [`crate::limits`].

use crate::error::{ErrorCode, Result};
use crate::limits::check_dimensions;
use crate::sheet_name::{quote_sheet_name, validate_sheet_name};

/// Zero-based row index, `0..ROW_MAX`
pub type RowIndex = u32;

/// Zero-based column index, `0..COL_MAX`
pub type ColIndex = u16;

fn push_col(out: &mut String, col: ColIndex, absolute: bool) {
    if absolute {
        out.push('$');
    }
    let start = out.len();
    let mut n = col as u32 + 1;
    while n > 0 {
        n -= 1;
        out.insert(start, ((n % 26) as u8 + b'A') as char);
        n /= 26;
    }
}

fn push_row(out: &mut String, row: RowIndex, absolute: bool) {
    if absolute {
        out.push('$');
    }
    out.push_str(&(row + 1).to_string());
}

/// Column letters, e.g. `0 -> "A"`, `16383 -> "XFD"`
pub fn col_to_name(col: ColIndex, absolute: bool) -> Result<String> {
    check_dimensions(0, col)?;
    let mut out = String::new();
    push_col(&mut out, col, absolute);
    Ok(out)
}

/// One-based row number, e.g. `0 -> "1"`
pub fn row_to_name(row: RowIndex, absolute: bool) -> Result<String> {
    check_dimensions(row, 0)?;
    let mut out = String::new();
    push_row(&mut out, row, absolute);
    Ok(out)
}

fn render_cell(out: &mut String, row: RowIndex, col: ColIndex, absolute: bool) -> Result<()> {
    check_dimensions(row, col)?;
    push_col(out, col, absolute);
    push_row(out, row, absolute);
    Ok(())
}

/// Relative cell reference, e.g. `B3`
pub fn cell_name(row: RowIndex, col: ColIndex) -> Result<String> {
    let mut out = String::new();
    render_cell(&mut out, row, col, false)?;
    Ok(out)
}

/// Absolute cell reference, e.g. `$B$3`
pub fn cell_name_abs(row: RowIndex, col: ColIndex) -> Result<String> {
    let mut out = String::new();
    render_cell(&mut out, row, col, true)?;
    Ok(out)
}

fn render_range(
    first_row: RowIndex,
    first_col: ColIndex,
    last_row: RowIndex,
    last_col: ColIndex,
    absolute: bool,
) -> Result<String> {
    let mut out = String::new();
    render_cell(&mut out, first_row, first_col, absolute)?;
    if (first_row, first_col) != (last_row, last_col) {
        out.push(':');
        render_cell(&mut out, last_row, last_col, absolute)?;
    }
    Ok(out)
}

/// Relative range reference, e.g. `A1:C5`; a single cell collapses to `A1`
pub fn range_name(
    first_row: RowIndex,
    first_col: ColIndex,
    last_row: RowIndex,
    last_col: ColIndex,
) -> Result<String> {
    render_range(first_row, first_col, last_row, last_col, false)
}

/// Absolute range reference, e.g. `$A$1:$C$5`
pub fn range_name_abs(
    first_row: RowIndex,
    first_col: ColIndex,
    last_row: RowIndex,
    last_col: ColIndex,
) -> Result<String> {
    render_range(first_row, first_col, last_row, last_col, true)
}

/// Sheet-qualified absolute range, e.g. `Sheet1!$A$1:$C$5` or `'Sales Data'!$A$1`
///
/// The sheet name must itself be a valid sheet name; the rule it breaks is returned.
pub fn formula_range(
    sheet: &str,
    first_row: RowIndex,
    first_col: ColIndex,
    last_row: RowIndex,
    last_col: ColIndex,
) -> Result<String> {
    validate_sheet_name(sheet, std::iter::empty())?;
    let range = range_name_abs(first_row, first_col, last_row, last_col)?;
    Ok(format!("{}!{}", quote_sheet_name(sheet), range))
}

/// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
pub fn letters_to_col(letters: &str) -> Result<ColIndex> {
    if letters.is_empty() {
        return Err(ErrorCode::ParameterIsEmpty);
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(ErrorCode::ParameterValidation);
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > crate::limits::COL_MAX as u32 {
            return Err(ErrorCode::WorksheetIndexOutOfRange);
        }
    }

    Ok((col - 1) as ColIndex)
}

/// Parse an A1-style reference such as `B3` or `$XFD$1048576` into zero-based indices
pub fn parse_cell(s: &str) -> Result<(RowIndex, ColIndex)> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ErrorCode::ParameterIsEmpty);
    }

    let s = s.strip_prefix('$').unwrap_or(s);
    let split = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or(ErrorCode::ParameterValidation)?;
    if split == 0 {
        return Err(ErrorCode::ParameterValidation);
    }
    let (letters, rest) = s.split_at(split);
    let col = letters_to_col(letters)?;

    let digits = rest.strip_prefix('$').unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorCode::ParameterValidation);
    }

    // Rows are 1-based on the sheet.
    let row: u32 = digits
        .parse()
        .map_err(|_| ErrorCode::WorksheetIndexOutOfRange)?;
    if row == 0 {
        return Err(ErrorCode::ParameterValidation);
    }
    let row = row - 1;

    check_dimensions(row, col)?;
    Ok((row, col))
}
