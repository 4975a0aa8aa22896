//! Diagnostic reporting
//!
//! Failures are always returned as [`ErrorCode`]s. In addition, the writer reports them to a
//! [`Reporter`] so a user can see what went wrong without a debugger. Reporting never changes
//! the returned code.
//!
//! The default sink, [`LogReporter`], forwards to the `log` facade. Components take a
//! `&dyn Reporter` so tests can capture output with a [`MemoryReporter`].

use std::collections::TryReserveError;
use std::fmt;
use std::panic::Location;
use std::sync::Mutex;

use crate::error::{ErrorCode, Result};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The current operation is aborted
    Error,
    /// The offending call is skipped, everything else continues
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A sink for diagnostics
pub trait Reporter: Send + Sync {
    /// Record one diagnostic message
    fn report(&self, severity: Severity, message: &str);
}

/// Reporter that forwards to the `log` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::error!(target: "sheetwright", "{message}"),
            Severity::Warning => log::warn!(target: "sheetwright", "{message}"),
        }
    }
}

static DEFAULT_REPORTER: LogReporter = LogReporter;

/// The process-wide reporter
pub fn default_reporter() -> &'static LogReporter {
    &DEFAULT_REPORTER
}

/// Reporter that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.lock().clone()
    }

    /// Messages only, in reporting order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Number of reported messages
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all stored messages
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Severity, String)>> {
        // A poisoned buffer still holds valid strings.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.lock().push((severity, message.to_owned()));
    }
}

/// Report an error, tagged with the caller's source location
#[track_caller]
pub fn report_error(reporter: &dyn Reporter, message: &str) {
    let loc = Location::caller();
    reporter.report(
        Severity::Error,
        &format!("[ERROR][{}:{}]: {}", loc.file(), loc.line(), message),
    );
}

/// Report a recoverable user mistake
pub fn report_warning(reporter: &dyn Reporter, message: &str) {
    reporter.report(Severity::Warning, &format!("[WARNING]: {message}"));
}

/// Report a failed allocation
#[track_caller]
pub fn report_mem_error(reporter: &dyn Reporter) {
    report_error(reporter, "Memory allocation failed.");
}

/// Turn a failed reservation into [`ErrorCode::MemoryMallocFailed`], reporting it first
///
/// ```
/// use sheetwright_core::diagnostics::{ensure_allocated, MemoryReporter};
/// use sheetwright_core::ErrorCode;
///
/// let reporter = MemoryReporter::new();
/// let mut buf: Vec<u8> = Vec::new();
///
/// assert!(ensure_allocated(buf.try_reserve(16), &reporter).is_ok());
/// assert_eq!(
///     ensure_allocated(buf.try_reserve(usize::MAX), &reporter),
///     Err(ErrorCode::MemoryMallocFailed)
/// );
/// assert_eq!(reporter.len(), 1);
/// ```
#[track_caller]
pub fn ensure_allocated<T>(
    result: std::result::Result<T, TryReserveError>,
    reporter: &dyn Reporter,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            report_mem_error(reporter);
            Err(ErrorCode::from(e))
        }
    }
}

/// Which kinds a chart axis has
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisKinds {
    /// Category (x) axis
    pub category: bool,
    /// Value axis
    pub value: bool,
    /// Date axis
    pub date: bool,
}

impl AxisKinds {
    /// A category axis
    pub fn category() -> Self {
        Self {
            category: true,
            ..Self::default()
        }
    }

    /// A value axis
    pub fn value() -> Self {
        Self {
            value: true,
            ..Self::default()
        }
    }

    /// A date axis
    pub fn date() -> Self {
        Self {
            date: true,
            ..Self::default()
        }
    }
}

/// Axis kinds an axis setter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRequirement {
    Category,
    Value,
    Date,
    CategoryOrDate,
    ValueOrDate,
}

impl AxisRequirement {
    /// Whether `axis` satisfies the requirement
    pub fn accepts(self, axis: AxisKinds) -> bool {
        match self {
            AxisRequirement::Category => axis.category,
            AxisRequirement::Value => axis.value,
            AxisRequirement::Date => axis.date,
            AxisRequirement::CategoryOrDate => axis.category || axis.date,
            AxisRequirement::ValueOrDate => axis.value || axis.date,
        }
    }

    fn label(self) -> &'static str {
        match self {
            AxisRequirement::Category => "category axes",
            AxisRequirement::Value => "value axes",
            AxisRequirement::Date => "date axes",
            AxisRequirement::CategoryOrDate => "category and date axes",
            AxisRequirement::ValueOrDate => "value and date axes",
        }
    }

    /// Guard an axis setter
    ///
    /// Returns `false` after warning when `function` was called on the wrong kind of axis;
    /// the caller must then return without applying anything.
    ///
    /// ```
    /// use sheetwright_core::diagnostics::{AxisKinds, AxisRequirement, MemoryReporter};
    ///
    /// let reporter = MemoryReporter::new();
    /// let ok = AxisRequirement::Category.check(
    ///     AxisKinds::value(),
    ///     "chart_axis_set_label_align",
    ///     &reporter,
    /// );
    ///
    /// assert!(!ok);
    /// assert_eq!(
    ///     reporter.messages(),
    ///     ["[WARNING]: chart_axis_set_label_align() is only valid for category axes"]
    /// );
    /// ```
    pub fn check(self, axis: AxisKinds, function: &str, reporter: &dyn Reporter) -> bool {
        if self.accepts(axis) {
            return true;
        }
        report_warning(
            reporter,
            &format!("{function}() is only valid for {}", self.label()),
        );
        false
    }
}
