//! Shared doubles and fixtures for compile core tests.

mod editor;
mod remote;

use std::collections::BTreeMap;
use std::sync::Arc;

use fastdeploy_config::{Credential, ExtensionConfig, ProjectConfig, StaticConfigService};
use rstest::fixture;

use crate::deploy::Deployer;
use crate::dispatcher::Dispatcher;
use crate::document::Document;
use crate::jobs::{CompileStatus, InlineScheduler};

pub use editor::{FakeEditor, JobEvent, RecordingNotifier, RecordingReporter, RecordingSink};
pub use remote::{FakeRemote, FakeTooling, RemoteCall};

/// Workspace root used by every harness.
pub const WORKSPACE_ROOT: &str = "/ws";

/// Builds a document under the harness workspace.
pub fn workspace_document(relative: &str, text: &str) -> Document {
    Document::from_path(format!("{WORKSPACE_ROOT}/{relative}"), text)
        .expect("absolute workspace path")
}

/// Extension configuration with one stored profile.
pub fn stored_config(deploy_on_save: bool) -> ExtensionConfig {
    let mut credentials = BTreeMap::new();
    credentials.insert(
        String::from("sandbox"),
        Credential {
            deploy_on_save,
            ..Credential::default()
        },
    );
    ExtensionConfig {
        stored: true,
        credentials,
        current_credential: String::from("sandbox"),
        ..ExtensionConfig::default()
    }
}

/// Collaborator doubles wired into a dispatcher.
pub struct Harness {
    /// Remote org double.
    pub remote: Arc<FakeRemote>,
    /// Tooling compile double.
    pub tooling: Arc<FakeTooling>,
    /// Problems panel double.
    pub sink: Arc<RecordingSink>,
    /// Alert double.
    pub notifier: Arc<RecordingNotifier>,
    /// Editor double.
    pub editor: Arc<FakeEditor>,
    /// Status reporter double.
    pub reporter: Arc<RecordingReporter>,
    /// Extension configuration served to the dispatcher.
    pub extension: ExtensionConfig,
    /// Project configuration served to the dispatcher.
    pub project: ProjectConfig,
}

impl Harness {
    /// Builds a harness with stored credentials that deploy on save.
    pub fn new() -> Self {
        Self {
            remote: Arc::new(FakeRemote::default()),
            tooling: Arc::new(FakeTooling::default()),
            sink: Arc::new(RecordingSink::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            editor: Arc::new(FakeEditor::new(Some(WORKSPACE_ROOT))),
            reporter: Arc::new(RecordingReporter::default()),
            extension: stored_config(true),
            project: ProjectConfig::default(),
        }
    }

    /// Deployer over the harness doubles.
    pub fn deployer(&self) -> Deployer {
        Deployer::new(
            Arc::clone(&self.remote) as _,
            Arc::clone(&self.tooling) as _,
            Arc::clone(&self.sink) as _,
            Arc::clone(&self.notifier) as _,
        )
    }

    /// Dispatcher over the harness doubles and current configuration.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            Arc::new(StaticConfigService::new(
                self.extension.clone(),
                self.project.clone(),
            )),
            Arc::clone(&self.editor) as _,
            Arc::new(InlineScheduler::new(Arc::clone(&self.reporter))),
            self.deployer(),
        )
    }

    /// Simulates saving `document`.
    pub fn save(&self, document: Document) {
        self.dispatcher().compile(Some(document));
    }

    /// Simulates the compile command on the focused document.
    pub fn run_command(&self) {
        self.dispatcher().compile(None);
    }

    /// Terminal statuses reported so far.
    pub fn statuses(&self) -> Vec<CompileStatus> {
        self.reporter.finished()
    }
}

/// Fresh harness.
#[fixture]
pub fn harness() -> Harness {
    Harness::new()
}
