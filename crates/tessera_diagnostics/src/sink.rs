//! Collection point for diagnostics raised during a run.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Accumulates diagnostics in emission order.
///
/// Warning and error tallies are atomics so callers can take a before/after
/// delta around a phase without locking the list.
#[derive(Default)]
pub struct DiagnosticSink {
    entries: Mutex<Vec<Diagnostic>>,
    warnings: AtomicUsize,
    errors: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        let tally = match diag.severity {
            Severity::Warning => Some(&self.warnings),
            Severity::Error => Some(&self.errors),
            Severity::Note | Severity::Help => None,
        };
        if let Some(tally) = tally {
            tally.fetch_add(1, Ordering::Relaxed);
        }
        self.entries.lock().unwrap().push(diag);
    }

    /// Warnings emitted since the sink was created.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Errors emitted since the sink was created.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Drains the recorded diagnostics. Tallies are kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }

    /// Copies the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.lock().unwrap().clone()
    }
}
