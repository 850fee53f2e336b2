//! Editor-side collaborators injected into the dispatcher.

use std::fmt;

use camino::Utf8PathBuf;
use lsp_types::{Diagnostic, Uri};

use crate::document::Document;

/// Problems panel for compiled documents.
pub trait DiagnosticsSink: Send + Sync {
    /// Replaces every diagnostic published for `uri`. An empty vector clears
    /// the document.
    fn set(&self, uri: &Uri, diagnostics: Vec<Diagnostic>);
}

impl fmt::Debug for dyn DiagnosticsSink {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("DiagnosticsSink")
    }
}

/// User-facing alerts for failures that carry no source position.
pub trait Notifier: Send + Sync {
    /// Shows `message` as an error alert.
    fn show_error(&self, message: &str);
}

impl fmt::Debug for dyn Notifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Notifier")
    }
}

/// Editor state read by user-triggered compiles.
pub trait EditorHost: Send + Sync {
    /// Document shown in the focused editor, if any.
    fn active_document(&self) -> Option<Document>;

    /// Root folder of the open workspace, if any.
    fn workspace_root(&self) -> Option<Utf8PathBuf>;
}

impl fmt::Debug for dyn EditorHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("EditorHost")
    }
}
