//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is; ordered `Help < Note < Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A suggestion attached to another message.
    Help,
    /// Progress or a state transition inside the legalizer.
    Note,
    /// A best-effort outcome the caller should review, such as an unplaced cell.
    Warning,
    /// The run could not do what was asked.
    Error,
}

impl Severity {
    /// ANSI SGR color code used by the terminal renderer.
    pub fn ansi_color(self) -> &'static str {
        match self {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note | Severity::Help => "36",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_outrank_notes() {
        let mut levels = vec![Severity::Error, Severity::Help, Severity::Warning, Severity::Note];
        levels.sort();
        assert_eq!(
            levels,
            [Severity::Help, Severity::Note, Severity::Warning, Severity::Error]
        );
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.to_string(), "note");
        assert_eq!(Severity::Warning.ansi_color(), "33");
        assert_eq!(Severity::Help.ansi_color(), Severity::Note.ansi_color());
    }
}
