//! Structured diagnostics produced while resolving a configuration file

use std::fmt;
use std::path::PathBuf;

/// Cannot read file
pub const CANNOT_READ_FILE: u32 = 5083;
/// Malformed JSON
pub const MALFORMED_JSON: u32 = 1005;
/// Root value of the file is not an object
pub const ROOT_NOT_OBJECT: u32 = 5092;
/// `extends` target does not exist
pub const EXTENDS_NOT_FOUND: u32 = 6053;
/// `extends` chain loops back on itself
pub const EXTENDS_CYCLE: u32 = 18000;
/// Option name is not a compiler option
pub const UNKNOWN_OPTION: u32 = 5023;
/// Option value has the wrong JSON type
pub const WRONG_OPTION_TYPE: u32 = 5024;
/// Option repeats the value inherited from its base configuration
pub const REDUNDANT_OPTION: u32 = 90_010;

/// Severity of a [`Diagnostic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Aborts resolution
    Error,
    /// Worth reporting, still aborts unless marked unnecessary
    Warning,
    /// Style-level hint
    Suggestion,
    /// Informational
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// A single configuration diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Numeric diagnostic code
    pub code: u32,
    /// Severity
    pub category: DiagnosticCategory,
    /// Human-readable message
    pub message: String,
    /// File the diagnostic refers to, if any
    pub file: Option<PathBuf>,
    /// Style-only diagnostic that never blocks resolution
    pub reports_unnecessary: bool,
}

impl Diagnostic {
    /// Create a diagnostic without a file
    pub fn new(code: u32, category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            file: None,
            reports_unnecessary: false,
        }
    }

    /// Shorthand for an error diagnostic attached to `file`
    pub fn error(code: u32, file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(code, DiagnosticCategory::Error, message).in_file(file)
    }

    /// Attach the diagnostic to a file
    #[must_use]
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Mark the diagnostic as style-only
    #[must_use]
    pub const fn unnecessary(mut self) -> Self {
        self.reports_unnecessary = true;
        self
    }

    /// Whether this diagnostic aborts resolution
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        !self.reports_unnecessary
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}: ", file.display())?;
        }
        write!(f, "{} TS{}: {}", self.category, self.code, self.message)
    }
}
