//! Normalised compile diagnostics and the parsers producing them.
//!
//! The remote platform reports failures in two unrelated shapes:
//!
//! - tooling container compiles return a list of component failure records
//!   (parsed by [`map_component_failures`]);
//! - Aura and Lightning web component deployments fail with a free-text
//!   compiler message (parsed by [`parse_compiler_error`]).
//!
//! Both parsers are pure and total: malformed input degrades to a diagnostic
//! on the first line instead of an error.

mod compiler;
mod tooling;

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::document::Document;

pub use compiler::parse_compiler_error;
pub use tooling::map_component_failures;

/// `source` attached to every diagnostic published by this crate.
pub const DIAGNOSTIC_SOURCE: &str = "fastdeploy";

/// Severity of a compile diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Compilation failed.
    Error,
    /// Compilation succeeded with a warning.
    Warning,
}

impl Severity {
    /// Maps the platform's `problemType` value. Anything other than
    /// `Warning` is an error.
    #[must_use]
    pub fn from_problem_type(problem_type: Option<&str>) -> Self {
        match problem_type {
            Some("Warning") => Self::Warning,
            _ => Self::Error,
        }
    }

    const fn to_lsp(self) -> DiagnosticSeverity {
        match self {
            Self::Error => DiagnosticSeverity::ERROR,
            Self::Warning => DiagnosticSeverity::WARNING,
        }
    }
}

/// A diagnostic anchored to a zero-based line of the compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDiagnostic {
    /// Zero-based line index, already clamped into the document.
    pub line: u32,
    /// Zero-based start column; `None` spans the whole line.
    pub column: Option<u32>,
    /// Message shown in the problems list.
    pub message: String,
    /// Diagnostic severity.
    pub severity: Severity,
}

impl NormalizedDiagnostic {
    /// Renders the diagnostic as an LSP diagnostic against `document`.
    ///
    /// The range runs from the start column (or the line start) to the end of
    /// the line.
    #[must_use]
    pub fn to_lsp(&self, document: &Document) -> Diagnostic {
        let start = self.column.unwrap_or(0);
        let end = document.line_length(self.line).max(start);
        Diagnostic {
            range: Range::new(
                Position::new(self.line, start),
                Position::new(self.line, end),
            ),
            severity: Some(self.severity.to_lsp()),
            source: Some(DIAGNOSTIC_SOURCE.to_owned()),
            message: self.message.clone(),
            ..Diagnostic::default()
        }
    }
}

/// Renders a diagnostic set against its document.
#[must_use]
pub fn render(diagnostics: &[NormalizedDiagnostic], document: &Document) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|diagnostic| diagnostic.to_lsp(document))
        .collect()
}

/// Parses a platform number the way a loose numeric coercion would: surrounding
/// whitespace is ignored and anything non-numeric yields `None`.
fn coerce_number(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
