//! Collection of soft diagnostics raised while a form is evaluated.

use formlet_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, SourceSpan};
use std::cell::RefCell;

/// Collects warnings from validation and rendering.
///
/// Queries on [`Form`](crate::Form) take `&self`, so the collector records
/// through interior mutability. A diagnostic identical to one already
/// recorded (same code, problem and location) is dropped, which keeps
/// repeated renders from piling up duplicates.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: RefCell<Vec<DiagnosticMessage>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, diagnostic: DiagnosticMessage) {
        let mut diagnostics = self.diagnostics.borrow_mut();
        let duplicate = diagnostics.iter().any(|d| {
            d.code == diagnostic.code
                && d.problem == diagnostic.problem
                && d.location == diagnostic.location
        });
        if !duplicate {
            diagnostics.push(diagnostic);
        }
    }

    /// Add a warning with error code and optional source location.
    pub fn warn_with_code(
        &self,
        code: &str,
        title: &str,
        problem: impl Into<String>,
        location: Option<SourceSpan>,
    ) {
        let mut builder = DiagnosticMessageBuilder::warning(title)
            .with_code(code)
            .problem(problem);
        if let Some(location) = location {
            builder = builder.with_location(location);
        }
        self.add(builder.build());
    }

    /// Snapshot of the collected diagnostics, sorted by source location.
    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        let mut diagnostics = self.diagnostics.borrow().clone();
        diagnostics.sort_by_key(|diag| diag.location.map_or(0, |loc| loc.start));
        diagnostics
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}
