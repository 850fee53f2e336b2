//! Recording doubles for the editor-side collaborators.

use std::sync::Mutex;

use camino::Utf8PathBuf;
use lsp_types::{Diagnostic, Uri};

use crate::document::Document;
use crate::host::{DiagnosticsSink, EditorHost, Notifier};
use crate::jobs::{CompileStatus, StatusReporter};

/// Problems panel recording every replacement.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sets: Mutex<Vec<(String, Vec<Diagnostic>)>>,
}

impl RecordingSink {
    /// Every `set` call as `(uri, diagnostics)`.
    pub fn sets(&self) -> Vec<(String, Vec<Diagnostic>)> {
        self.sets.lock().expect("sink lock").clone()
    }

    /// The most recent set published for `uri`.
    pub fn current(&self, uri: &str) -> Option<Vec<Diagnostic>> {
        self.sets()
            .into_iter()
            .rev()
            .find(|(key, _)| key == uri)
            .map(|(_, diagnostics)| diagnostics)
    }
}

impl DiagnosticsSink for RecordingSink {
    fn set(&self, uri: &Uri, diagnostics: Vec<Diagnostic>) {
        self.sets
            .lock()
            .expect("sink lock")
            .push((uri.as_str().to_owned(), diagnostics));
    }
}

/// Notifier recording alert messages.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.alerts
            .lock()
            .expect("notifier lock")
            .push(message.to_owned());
    }
}

/// Editor with a settable focused document.
#[derive(Debug)]
pub struct FakeEditor {
    active: Mutex<Option<Document>>,
    root: Option<Utf8PathBuf>,
}

impl FakeEditor {
    /// Builds an editor whose workspace is rooted at `root`.
    pub fn new(root: Option<&str>) -> Self {
        Self {
            active: Mutex::new(None),
            root: root.map(Utf8PathBuf::from),
        }
    }

    /// Focuses `document`.
    pub fn focus(&self, document: Document) {
        *self.active.lock().expect("editor lock") = Some(document);
    }
}

impl EditorHost for FakeEditor {
    fn active_document(&self) -> Option<Document> {
        self.active.lock().expect("editor lock").clone()
    }

    fn workspace_root(&self) -> Option<Utf8PathBuf> {
        self.root.clone()
    }
}

/// A job lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// A job started for the key.
    Started(String),
    /// A job finished for the key.
    Finished(String, CompileStatus),
}

/// Status reporter recording job events.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<JobEvent>>,
}

impl RecordingReporter {
    /// Events observed so far.
    pub fn events(&self) -> Vec<JobEvent> {
        self.events.lock().expect("reporter lock").clone()
    }

    /// Terminal statuses in reporting order.
    pub fn finished(&self) -> Vec<CompileStatus> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                JobEvent::Finished(_, status) => Some(status),
                JobEvent::Started(_) => None,
            })
            .collect()
    }
}

impl StatusReporter for RecordingReporter {
    fn job_started(&self, key: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(JobEvent::Started(key.to_owned()));
    }

    fn job_finished(&self, key: &str, status: CompileStatus) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(JobEvent::Finished(key.to_owned(), status));
    }
}
