//! Diagnostics taxonomy and sink
//!
//! Codes are stable identifiers, not free text; the renderer keys help and
//! display behavior off them. The sink is append-only for the duration of
//! one `compile()` call and is consumed into the final output, so a fresh
//! compiler run can never observe diagnostics from a previous document.

use crate::ast::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes, in the fixed taxonomy
///
/// `E001`, `E002` and `E009` are fatal to the document; `E005` and `E006`
/// drop the offending block only (but still count against `success`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Frontmatter section entirely missing
    E001,
    /// One or more required metadata fields missing
    E002,
    /// A directive is missing one of its required fields
    E005,
    /// A `json` escape-hatch directive's content is not valid JSON
    E006,
    /// Metadata field present but outside its closed enumeration
    E009,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningCode {
    /// Directive name not recognized
    W001,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One accumulated compile error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl CompilerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{}: {} ({})", self.code, self.message, loc),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// One accumulated compile warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerWarning {
    pub code: WarningCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl CompilerWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for CompilerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{}: {} ({})", self.code, self.message, loc),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Append-only diagnostics sink for one `compile()` call
///
/// Seeded with whatever the upstream parser already reported, then threaded
/// by mutable reference through every compiler component.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<CompilerError>,
    warnings: Vec<CompilerWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the diagnostics carried on the input AST
    pub fn seeded(errors: Vec<CompilerError>, warnings: Vec<CompilerWarning>) -> Self {
        Self { errors, warnings }
    }

    pub fn error(&mut self, error: CompilerError) {
        self.errors.push(error);
    }

    pub fn warning(&mut self, warning: CompilerWarning) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Freeze the sink into the final error/warning lists
    pub fn into_parts(self) -> (Vec<CompilerError>, Vec<CompilerWarning>) {
        (self.errors, self.warnings)
    }
}
