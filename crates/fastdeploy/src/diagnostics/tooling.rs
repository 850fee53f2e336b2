//! Component failure records returned by tooling container compiles.

use crate::remote::ComponentFailure;

use super::{NormalizedDiagnostic, Severity};

/// Maps component failures to diagnostics, preserving input order.
///
/// Records whose capitalised `ProblemType` is `Error` are dropped; they are
/// reported through a different channel. Line numbers are taken as absolute
/// values, converted to zero-based indices, and clamped into the document. A
/// positive column starts the range at that column; otherwise the diagnostic
/// spans the whole line.
#[must_use]
pub fn map_component_failures(
    failures: &[ComponentFailure],
    line_count: u32,
) -> Vec<NormalizedDiagnostic> {
    let last_line = u64::from(line_count.saturating_sub(1));
    failures
        .iter()
        .filter(|failure| failure.legacy_problem_type.as_deref() != Some("Error"))
        .map(|failure| {
            let index = failure.line_number().unsigned_abs().saturating_sub(1);
            let line = u32::try_from(index.min(last_line)).unwrap_or_default();
            let column = failure
                .column_number
                .filter(|column| *column > 0)
                .and_then(|column| u32::try_from(column - 1).ok());
            NormalizedDiagnostic {
                line,
                column,
                message: failure.problem.clone(),
                severity: Severity::from_problem_type(failure.problem_type.as_deref()),
            }
        })
        .collect()
}
