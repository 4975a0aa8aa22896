//! Worksheet name rules

use crate::cell_ref::parse_cell;
use crate::error::{ErrorCode, Result};
use crate::limits::SHEETNAME_MAX;

/// Characters Excel rejects anywhere in a sheet name
pub const INVALID_SHEETNAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Validate a sheet name against the names already used in the workbook
///
/// Rules are applied in order and the first failure wins:
/// 1. the name is not empty
/// 2. it has at most 31 characters
/// 3. it contains none of `[ ] : * ? / \`
/// 4. it does not start or end with an apostrophe
/// 5. it does not match an existing name, ignoring case
///
/// # Examples
/// ```
/// use sheetwright_core::{validate_sheet_name, ErrorCode};
///
/// assert!(validate_sheet_name("Data", ["Sheet1"]).is_ok());
/// assert_eq!(
///     validate_sheet_name("SHEET1", ["Sheet1"]),
///     Err(ErrorCode::SheetnameAlreadyUsed)
/// );
/// ```
pub fn validate_sheet_name<'a, I>(name: &str, existing: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    if name.is_empty() {
        return Err(ErrorCode::ParameterIsEmpty);
    }

    if name.chars().count() > SHEETNAME_MAX {
        return Err(ErrorCode::SheetnameLengthExceeded);
    }

    if name.contains(INVALID_SHEETNAME_CHARS) {
        return Err(ErrorCode::InvalidSheetnameCharacter);
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ErrorCode::SheetnameStartEndApostrophe);
    }

    let name_lower = name.to_lowercase();
    if existing
        .into_iter()
        .any(|used| used.to_lowercase() == name_lower)
    {
        return Err(ErrorCode::SheetnameAlreadyUsed);
    }

    Ok(())
}

/// Quote a sheet name for use in a formula or defined name, if it needs it
///
/// Plain names (ASCII letters, digits, `_` and `.`, not starting with a digit or `.` and not
/// readable as a cell reference) are returned as is. Anything else is wrapped in apostrophes
/// with embedded apostrophes doubled.
///
/// ```
/// use sheetwright_core::quote_sheet_name;
///
/// assert_eq!(quote_sheet_name("Sheet1"), "Sheet1");
/// assert_eq!(quote_sheet_name("Q1 Sales"), "'Q1 Sales'");
/// assert_eq!(quote_sheet_name("Bob's"), "'Bob''s'");
/// ```
pub fn quote_sheet_name(name: &str) -> String {
    if !needs_quoting(name) {
        return name.to_string();
    }
    format!("'{}'", name.replace('\'', "''"))
}

fn needs_quoting(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };

    if first.is_ascii_digit() || first == '.' {
        return true;
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return true;
    }

    parse_cell(name).is_ok()
}

/// Names used within one workbook, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SheetNames {
    names: Vec<String>,
}

impl SheetNames {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `name` against the registered names and register it
    pub fn register(&mut self, name: &str) -> Result<()> {
        validate_sheet_name(name, self.iter())?;
        self.names.push(name.to_string());
        Ok(())
    }

    /// Case-insensitive lookup
    pub fn contains(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.names.iter().any(|n| n.to_lowercase() == name_lower)
    }

    /// Registered names in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no name has been registered yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_sheet_name("", NONE), Err(ErrorCode::ParameterIsEmpty));
    }

    #[test]
    fn test_length() {
        let ok = "A".repeat(SHEETNAME_MAX);
        assert_eq!(validate_sheet_name(&ok, NONE), Ok(()));

        let long = "A".repeat(SHEETNAME_MAX + 1);
        assert_eq!(
            validate_sheet_name(&long, NONE),
            Err(ErrorCode::SheetnameLengthExceeded)
        );

        // Characters, not bytes
        let wide = "\u{00e9}".repeat(SHEETNAME_MAX);
        assert_eq!(validate_sheet_name(&wide, NONE), Ok(()));
    }

    #[test]
    fn test_invalid_characters() {
        for c in INVALID_SHEETNAME_CHARS {
            let name = format!("Sheet{c}1");
            assert_eq!(
                validate_sheet_name(&name, NONE),
                Err(ErrorCode::InvalidSheetnameCharacter),
                "{name}"
            );
        }
    }

    #[test]
    fn test_apostrophes() {
        assert_eq!(
            validate_sheet_name("'Sheet", NONE),
            Err(ErrorCode::SheetnameStartEndApostrophe)
        );
        assert_eq!(
            validate_sheet_name("Sheet'", NONE),
            Err(ErrorCode::SheetnameStartEndApostrophe)
        );
        assert_eq!(validate_sheet_name("Bob's", NONE), Ok(()));
    }

    #[test]
    fn test_rule_order() {
        // Too long and containing an invalid character: length wins
        let name = format!("{}*", "A".repeat(SHEETNAME_MAX));
        assert_eq!(
            validate_sheet_name(&name, NONE),
            Err(ErrorCode::SheetnameLengthExceeded)
        );

        // Invalid character and apostrophe: character wins
        assert_eq!(
            validate_sheet_name("'a*", NONE),
            Err(ErrorCode::InvalidSheetnameCharacter)
        );

        // Apostrophe beats duplicate
        assert_eq!(
            validate_sheet_name("'x'", ["'x'"]),
            Err(ErrorCode::SheetnameStartEndApostrophe)
        );
    }

    #[test]
    fn test_registry() {
        let mut names = SheetNames::new();
        names.register("Sheet1").unwrap();
        names.register("Data").unwrap();

        assert_eq!(names.register("sheet1"), Err(ErrorCode::SheetnameAlreadyUsed));
        assert_eq!(names.register("DATA"), Err(ErrorCode::SheetnameAlreadyUsed));
        assert_eq!(names.len(), 2);

        assert!(names.contains("data"));
        assert!(!names.contains("Other"));
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["Sheet1", "Data"]);
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_sheet_name("Data_2024.v2"), "Data_2024.v2");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
        assert_eq!(quote_sheet_name("A1"), "'A1'");
        assert_eq!(quote_sheet_name("XFD1048576"), "'XFD1048576'");
        assert_eq!(quote_sheet_name("Ünïcode"), "'Ünïcode'");
        assert_eq!(quote_sheet_name(""), "");
    }
}
