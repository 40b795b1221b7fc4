//! Validation error taxonomy shared by the audit engine and the
//! generation-time helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error family, one per kind of spec requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Font,
    Color,
    Size,
    Border,
    Spacing,
    Table,
    Callout,
    Structure,
    /// Generation-time helper input (empty titles, missing fields).
    Input,
    /// Generation-time filename convention check.
    Filename,
}

impl ErrorKind {
    /// Name of the error type as it appears in reports.
    pub fn type_name(self) -> &'static str {
        match self {
            ErrorKind::Font => "FontValidationError",
            ErrorKind::Color => "ColorValidationError",
            ErrorKind::Size => "SizeValidationError",
            ErrorKind::Border => "BorderValidationError",
            ErrorKind::Spacing => "SpacingValidationError",
            ErrorKind::Table => "TableValidationError",
            ErrorKind::Callout => "CalloutValidationError",
            ErrorKind::Structure => "StructureValidationError",
            ErrorKind::Input => "InputValidationError",
            ErrorKind::Filename => "FilenameValidationError",
        }
    }

    /// Fix suggestion derived from an actual/expected pair.
    ///
    /// Returns `None` for kinds without a known remedy; reports then show the
    /// raw message only.
    pub fn suggest_fix(self, actual: &str, expected: &str) -> Option<String> {
        let text = match self {
            ErrorKind::Font => format!("Change font from {actual} to {expected}"),
            ErrorKind::Color => format!("Set color to #{expected} (currently {actual})"),
            ErrorKind::Size => format!("Set font size to {expected} half-points (currently {actual})"),
            ErrorKind::Border => format!("Set border to {expected} (currently {actual})"),
            ErrorKind::Spacing => format!("Adjust to {expected} DXA (currently {actual})"),
            ErrorKind::Table => format!("Fix table content: expected {expected}"),
            ErrorKind::Callout => format!("Apply {expected} callout styling"),
            ErrorKind::Structure => format!("Add the missing element: {expected}"),
            ErrorKind::Filename => format!("Rename the file to match {expected}"),
            ErrorKind::Input => return None,
        };
        Some(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule violation, captured as data.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
    /// Machine-readable rule discriminator, e.g. `HDR-R2-BG`.
    pub rule: String,
    pub severity: Severity,
    /// Path through nested elements, e.g. `table[3]/row[2]`.
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub suggestion: Option<String>,
    pub actual: String,
    pub expected: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            rule: rule.into(),
            severity: Severity::Error,
            location: String::new(),
            timestamp: Utc::now(),
            suggestion: None,
            actual: String::new(),
            expected: String::new(),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Attach the observed and expected values and derive a fix suggestion.
    #[must_use]
    pub fn with_values(mut self, actual: impl Into<String>, expected: impl Into<String>) -> Self {
        self.actual = actual.into();
        self.expected = expected.into();
        self.suggestion = self.kind.suggest_fix(&self.actual, &self.expected);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

// Timestamps differ between runs; two audits of the same bytes must compare equal.
impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.rule == other.rule
            && self.severity == other.severity
            && self.location == other.location
            && self.suggestion == other.suggestion
            && self.actual == other.actual
            && self.expected == other.expected
    }
}

impl Eq for ValidationError {}
