//! Error codes for sheetwright
//!
//! Every fallible operation in the writer reports through [`ErrorCode`]. The numeric value of
//! each variant is part of the public contract: variants are never renumbered and new ones are
//! only ever appended at the end of the list.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Result type alias using [`ErrorCode`]
pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Error codes returned by sheetwright functions
///
/// The `Display` text of each variant is its stable description from
/// [`ErrorCode::description`].
#[derive(Debug, Error, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ErrorCode {
    /// No error
    #[default]
    #[error("{}", self.description())]
    NoError = 0,

    /// Failed to allocate required memory
    #[error("{}", self.description())]
    MemoryMallocFailed = 1,

    /// Error creating the output xlsx file, usually a permissions error
    #[error("{}", self.description())]
    CreatingXlsxFile = 2,

    /// Error creating a temporary file during file assembly
    #[error("{}", self.description())]
    CreatingTmpfile = 3,

    /// Error reading a temporary file
    #[error("{}", self.description())]
    ReadingTmpfile = 4,

    /// Generic archive error while creating the xlsx file
    #[error("{}", self.description())]
    ZipFileOperation = 5,

    /// Archive parameter error
    #[error("{}", self.description())]
    ZipParameterError = 6,

    /// Archive is malformed, zip64 may be required
    #[error("{}", self.description())]
    ZipBadZipFile = 7,

    /// Internal archive error
    #[error("{}", self.description())]
    ZipInternalError = 8,

    /// File error or unknown archive error when adding a part
    #[error("{}", self.description())]
    ZipFileAdd = 9,

    /// Unknown archive error when closing the output
    #[error("{}", self.description())]
    ZipClose = 10,

    /// Feature not supported in this configuration
    #[error("{}", self.description())]
    FeatureNotSupported = 11,

    /// A required parameter was missing and the call was ignored
    #[error("{}", self.description())]
    NullParameterIgnored = 12,

    /// Generic parameter validation failure
    #[error("{}", self.description())]
    ParameterValidation = 13,

    /// A string parameter was empty
    #[error("{}", self.description())]
    ParameterIsEmpty = 14,

    /// Worksheet name longer than 31 characters
    #[error("{}", self.description())]
    SheetnameLengthExceeded = 15,

    /// Worksheet name contains one of `[ ] : * ? / \`
    #[error("{}", self.description())]
    InvalidSheetnameCharacter = 16,

    /// Worksheet name starts or ends with an apostrophe
    #[error("{}", self.description())]
    SheetnameStartEndApostrophe = 17,

    /// Worksheet name already in use (case-insensitive)
    #[error("{}", self.description())]
    SheetnameAlreadyUsed = 18,

    /// Parameter longer than 32 characters
    #[error("{}", self.description())]
    StringLengthExceeded32 = 19,

    /// Parameter longer than 128 characters
    #[error("{}", self.description())]
    StringLengthExceeded128 = 20,

    /// Parameter longer than 255 characters
    #[error("{}", self.description())]
    StringLengthExceeded255 = 21,

    /// String longer than 32,767 characters
    #[error("{}", self.description())]
    MaxStringLengthExceeded = 22,

    /// Shared string table lookup failed
    #[error("{}", self.description())]
    SharedStringIndexNotFound = 23,

    /// Row or column outside the worksheet grid
    #[error("{}", self.description())]
    WorksheetIndexOutOfRange = 24,

    /// Hyperlink longer than 2079 characters
    #[error("{}", self.description())]
    WorksheetMaxUrlLengthExceeded = 25,

    /// More than 65,530 hyperlinks in one worksheet
    #[error("{}", self.description())]
    WorksheetMaxNumberUrlsExceeded = 26,

    /// Image dimensions or DPI could not be read
    #[error("{}", self.description())]
    ImageDimensions = 27,
}

/// Broad grouping of error codes, used to decide how far a failure propagates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The success sentinel
    None,
    /// Memory, file and archive failures; fatal to the current top-level operation
    Resource,
    /// Bad caller input; the offending call is a no-op
    Validation,
    /// Unsupported configuration; reported once, the call is a no-op
    Feature,
}

impl ErrorCode {
    /// Every variant, in numeric order
    pub const ALL: [ErrorCode; 28] = [
        ErrorCode::NoError,
        ErrorCode::MemoryMallocFailed,
        ErrorCode::CreatingXlsxFile,
        ErrorCode::CreatingTmpfile,
        ErrorCode::ReadingTmpfile,
        ErrorCode::ZipFileOperation,
        ErrorCode::ZipParameterError,
        ErrorCode::ZipBadZipFile,
        ErrorCode::ZipInternalError,
        ErrorCode::ZipFileAdd,
        ErrorCode::ZipClose,
        ErrorCode::FeatureNotSupported,
        ErrorCode::NullParameterIgnored,
        ErrorCode::ParameterValidation,
        ErrorCode::ParameterIsEmpty,
        ErrorCode::SheetnameLengthExceeded,
        ErrorCode::InvalidSheetnameCharacter,
        ErrorCode::SheetnameStartEndApostrophe,
        ErrorCode::SheetnameAlreadyUsed,
        ErrorCode::StringLengthExceeded32,
        ErrorCode::StringLengthExceeded128,
        ErrorCode::StringLengthExceeded255,
        ErrorCode::MaxStringLengthExceeded,
        ErrorCode::SharedStringIndexNotFound,
        ErrorCode::WorksheetIndexOutOfRange,
        ErrorCode::WorksheetMaxUrlLengthExceeded,
        ErrorCode::WorksheetMaxNumberUrlsExceeded,
        ErrorCode::ImageDimensions,
    ];

    /// One past the highest assigned code
    pub const MAX_ERRNO: u8 = Self::ALL.len() as u8;

    /// Numeric value of the code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a code by its numeric value
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Whether this is the success sentinel
    pub fn is_ok(self) -> bool {
        self == ErrorCode::NoError
    }

    /// Whether this is a failure
    pub fn is_err(self) -> bool {
        !self.is_ok()
    }

    /// Convert a bare code into a `Result`, mapping the sentinel to `Ok`
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Stable, human-readable description of the code
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::NoError => "No error.",
            ErrorCode::MemoryMallocFailed => "Memory error, failed to malloc() required memory.",
            ErrorCode::CreatingXlsxFile => {
                "Error creating output xlsx file. Usually a permissions error."
            }
            ErrorCode::CreatingTmpfile => {
                "Error encountered when creating a tmpfile during file assembly."
            }
            ErrorCode::ReadingTmpfile => "Error reading a tmpfile.",
            ErrorCode::ZipFileOperation => {
                "Zip generic error ZIP_ERRNO while creating the xlsx file."
            }
            ErrorCode::ZipParameterError => {
                "Zip error ZIP_PARAMERROR while creating the xlsx file."
            }
            ErrorCode::ZipBadZipFile => {
                "Zip error ZIP_BADZIPFILE (use_zip64 option may be required)."
            }
            ErrorCode::ZipInternalError => {
                "Zip error ZIP_INTERNALERROR while creating the xlsx file."
            }
            ErrorCode::ZipFileAdd => {
                "File error or unknown zip error when adding sub file to xlsx file."
            }
            ErrorCode::ZipClose => "Unknown zip error when closing xlsx file.",
            ErrorCode::FeatureNotSupported => {
                "Feature is not currently supported in this configuration."
            }
            ErrorCode::NullParameterIgnored => "NULL function parameter ignored.",
            ErrorCode::ParameterValidation => "Function parameter validation error.",
            ErrorCode::ParameterIsEmpty => "Function string parameter is empty.",
            ErrorCode::SheetnameLengthExceeded => {
                "Worksheet name exceeds Excel's limit of 31 characters."
            }
            ErrorCode::InvalidSheetnameCharacter => {
                "Worksheet name cannot contain invalid characters: '[ ] : * ? / \\'."
            }
            ErrorCode::SheetnameStartEndApostrophe => {
                "Worksheet name cannot start or end with an apostrophe."
            }
            ErrorCode::SheetnameAlreadyUsed => "Worksheet name is already in use.",
            ErrorCode::StringLengthExceeded32 => {
                "Parameter exceeds Excel's limit of 32 characters."
            }
            ErrorCode::StringLengthExceeded128 => {
                "Parameter exceeds Excel's limit of 128 characters."
            }
            ErrorCode::StringLengthExceeded255 => {
                "Parameter exceeds Excel's limit of 255 characters."
            }
            ErrorCode::MaxStringLengthExceeded => {
                "String exceeds Excel's limit of 32,767 characters."
            }
            ErrorCode::SharedStringIndexNotFound => "Error finding internal string index.",
            ErrorCode::WorksheetIndexOutOfRange => "Worksheet row or column index out of range.",
            ErrorCode::WorksheetMaxUrlLengthExceeded => "Maximum hyperlink length (2079) exceeded.",
            ErrorCode::WorksheetMaxNumberUrlsExceeded => {
                "Maximum number of worksheet URLs (65530) exceeded."
            }
            ErrorCode::ImageDimensions => "Couldn't read image dimensions or DPI.",
        }
    }

    /// Which propagation group the code belongs to
    pub fn class(self) -> ErrorClass {
        use ErrorCode::*;

        match self {
            NoError => ErrorClass::None,
            MemoryMallocFailed | CreatingXlsxFile | CreatingTmpfile | ReadingTmpfile
            | ZipFileOperation | ZipParameterError | ZipBadZipFile | ZipInternalError
            | ZipFileAdd | ZipClose => ErrorClass::Resource,
            FeatureNotSupported => ErrorClass::Feature,
            NullParameterIgnored
            | ParameterValidation
            | ParameterIsEmpty
            | SheetnameLengthExceeded
            | InvalidSheetnameCharacter
            | SheetnameStartEndApostrophe
            | SheetnameAlreadyUsed
            | StringLengthExceeded32
            | StringLengthExceeded128
            | StringLengthExceeded255
            | MaxStringLengthExceeded
            | SharedStringIndexNotFound
            | WorksheetIndexOutOfRange
            | WorksheetMaxUrlLengthExceeded
            | WorksheetMaxNumberUrlsExceeded
            | ImageDimensions => ErrorClass::Validation,
        }
    }

    /// Resource failures abort the whole document, everything else skips one call
    pub fn is_fatal(self) -> bool {
        self.class() == ErrorClass::Resource
    }

    /// Map an I/O failure from a temp-file collaborator onto a resource code
    ///
    /// Failures that happen before any byte is read (missing file, permissions)
    /// count as creation failures; everything else as read failures.
    pub fn from_io_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::AlreadyExists => ErrorCode::CreatingTmpfile,
            io::ErrorKind::OutOfMemory => ErrorCode::MemoryMallocFailed,
            _ => ErrorCode::ReadingTmpfile,
        }
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl From<io::Error> for ErrorCode {
    fn from(err: io::Error) -> Self {
        ErrorCode::from_io_error(&err)
    }
}

impl From<TryReserveError> for ErrorCode {
    fn from(_: TryReserveError) -> Self {
        ErrorCode::MemoryMallocFailed
    }
}

/// Describe a numeric error code
///
/// Unknown numbers yield a fixed fallback instead of failing.
pub fn strerror(code: u8) -> &'static str {
    ErrorCode::from_code(code)
        .map(ErrorCode::description)
        .unwrap_or("Unknown error number.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_in_numeric_order() {
        for (i, code) in ErrorCode::ALL.iter().enumerate() {
            assert_eq!(code.code() as usize, i, "{code:?} is out of order");
        }
        assert_eq!(ErrorCode::MAX_ERRNO, 28);
    }

    #[test]
    fn test_descriptions_are_distinct_and_non_empty() {
        let mut seen = HashSet::new();
        for code in ErrorCode::ALL {
            let desc = code.description();
            assert!(!desc.is_empty(), "{code:?} has no description");
            assert!(seen.insert(desc), "{code:?} shares its description");
        }
    }

    #[test]
    fn test_display_matches_description() {
        for code in ErrorCode::ALL {
            assert_eq!(code.to_string(), code.description());
        }
        assert_eq!(
            ErrorCode::SheetnameAlreadyUsed.to_string(),
            "Worksheet name is already in use."
        );
        assert_eq!(
            ErrorCode::InvalidSheetnameCharacter.to_string(),
            "Worksheet name cannot contain invalid characters: '[ ] : * ? / \\'."
        );
    }

    #[test]
    fn test_sentinel() {
        assert!(ErrorCode::NoError.is_ok());
        assert_eq!(ErrorCode::NoError.code(), 0);
        assert_eq!(ErrorCode::default(), ErrorCode::NoError);
        assert_eq!(ErrorCode::NoError.into_result(), Ok(()));

        let sentinels = ErrorCode::ALL.iter().filter(|c| c.is_ok()).count();
        assert_eq!(sentinels, 1);
        assert_eq!(
            ErrorCode::SheetnameAlreadyUsed.into_result(),
            Err(ErrorCode::SheetnameAlreadyUsed)
        );
    }

    #[test]
    fn test_stable_numbers() {
        assert_eq!(ErrorCode::MemoryMallocFailed.code(), 1);
        assert_eq!(ErrorCode::ParameterIsEmpty.code(), 14);
        assert_eq!(ErrorCode::StringLengthExceeded255.code(), 21);
        assert_eq!(ErrorCode::ImageDimensions.code(), 27);
    }

    #[test]
    fn test_strerror() {
        assert_eq!(strerror(22), "String exceeds Excel's limit of 32,767 characters.");
        assert_eq!(strerror(ErrorCode::MAX_ERRNO), "Unknown error number.");
        assert_eq!(strerror(200), "Unknown error number.");
    }

    #[test]
    fn test_classes() {
        assert_eq!(ErrorCode::NoError.class(), ErrorClass::None);
        assert!(ErrorCode::ZipClose.is_fatal());
        assert!(ErrorCode::MemoryMallocFailed.is_fatal());
        assert!(!ErrorCode::SheetnameAlreadyUsed.is_fatal());
        assert_eq!(ErrorCode::FeatureNotSupported.class(), ErrorClass::Feature);
        assert_eq!(
            ErrorCode::WorksheetIndexOutOfRange.class(),
            ErrorClass::Validation
        );
    }

    #[test]
    fn test_conversions() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(ErrorCode::from(err), ErrorCode::CreatingTmpfile);

        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
        assert_eq!(ErrorCode::from(err), ErrorCode::ReadingTmpfile);

        let reserve = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(ErrorCode::from(reserve), ErrorCode::MemoryMallocFailed);
    }
}
