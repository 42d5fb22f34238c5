//! Diagnostic codes: a category letter followed by a three-digit number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a diagnostic code belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`: the run could not proceed.
    Error,
    /// `W`: a cell or group ended in a degraded state.
    Warning,
    /// `I`: progress and state transitions.
    Info,
}

impl Category {
    /// The letter printed in front of the number.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Info => 'I',
        }
    }
}

/// A stable identifier such as `W201` or `I020`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Family of the code.
    pub category: Category,
    /// Number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code from its parts.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// An `I` code.
    pub const fn info(number: u16) -> Self {
        Self::new(Category::Info, number)
    }

    /// A `W` code.
    pub const fn warning(number: u16) -> Self {
        Self::new(Category::Warning, number)
    }

    /// An `E` code.
    pub const fn error(number: u16) -> Self {
        Self::new(Category::Error, number)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
