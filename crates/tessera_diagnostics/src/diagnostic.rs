//! Structured diagnostic messages with severity, codes, subjects, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The design object a diagnostic is about.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Subject {
    /// A cell instance, by name.
    Cell(String),
    /// A placement group, by name.
    Group(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Cell(name) => write!(f, "cell {name}"),
            Subject::Group(name) => write!(f, "group {name}"),
        }
    }
}

/// A structured diagnostic message.
///
/// Each diagnostic includes a severity level and code, a primary message, the
/// design object it concerns (if any), and optional notes and help text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the message is.
    pub severity: Severity,
    /// Stable identifier, e.g. `W203`.
    pub code: DiagnosticCode,
    /// One-line summary.
    pub message: String,
    /// Cell or group the message is about.
    pub subject: Option<Subject>,
    /// Context lines rendered as `= note:`.
    pub notes: Vec<String>,
    /// Suggestions rendered as `= help:`.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message.into())
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message.into())
    }

    /// Creates a new informational note.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message.into())
    }

    /// Attaches the design object this diagnostic is about.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Appends a `note` line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Appends a `help` line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        let warn = Diagnostic::warning(DiagnosticCode::warning(203), "cell left unplaced");
        let note = Diagnostic::note(DiagnosticCode::info(1), "regions assigned");
        assert_eq!(warn.severity, Severity::Warning);
        assert_eq!(note.severity, Severity::Note);
        assert!(warn.subject.is_none() && warn.notes.is_empty());
    }

    #[test]
    fn attachments_accumulate_in_order() {
        let diag = Diagnostic::warning(DiagnosticCode::warning(201), "cannot place cell")
            .with_subject(Subject::Cell("u_alu/add_0".into()))
            .with_note("group utilization 0.97")
            .with_note("boundary [0, 8) x [0, 2)")
            .with_help("enlarge the group's regions");
        assert_eq!(diag.subject, Some(Subject::Cell("u_alu/add_0".into())));
        assert_eq!(diag.notes, ["group utilization 0.97", "boundary [0, 8) x [0, 2)"]);
        assert_eq!(diag.help, ["enlarge the group's regions"]);
    }

    #[test]
    fn subjects_name_their_kind() {
        assert_eq!(Subject::Cell("u1".into()).to_string(), "cell u1");
        assert_eq!(Subject::Group("pd_core".into()).to_string(), "group pd_core");
    }
}
