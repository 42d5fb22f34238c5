//! Structured diagnostics for the legalizer and its CLI.
//!
//! A [`Diagnostic`] pairs a [`Severity`] and a [`DiagnosticCode`] with a
//! message, the cell or group it is about, and trailing note/help lines.
//! The legalizer reports into a shared [`DiagnosticSink`]; the CLI prints the
//! collected entries with [`TerminalRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Subject};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
