//! Entry point turning save events and user commands into compile jobs.

use std::fmt;
use std::sync::Arc;

use camino::Utf8Path;
use fastdeploy_config::ConfigService;
use tracing::{debug, warn};

use crate::artifact::{Artifact, classify, workspace_relative_path};
use crate::deploy::Deployer;
use crate::document::Document;
use crate::host::EditorHost;
use crate::jobs::JobScheduler;

pub(crate) const DISPATCH_TARGET: &str = "fastdeploy::dispatch";

/// Decides whether a document compiles and schedules the matching strategy.
pub struct Dispatcher {
    config: Arc<dyn ConfigService>,
    editor: Arc<dyn EditorHost>,
    scheduler: Arc<dyn JobScheduler>,
    deployer: Arc<Deployer>,
}

impl Dispatcher {
    /// Builds a dispatcher over the supplied collaborators.
    #[must_use]
    pub fn new(
        config: Arc<dyn ConfigService>,
        editor: Arc<dyn EditorHost>,
        scheduler: Arc<dyn JobScheduler>,
        deployer: Deployer,
    ) -> Self {
        Self {
            config,
            editor,
            scheduler,
            deployer: Arc::new(deployer),
        }
    }

    /// Compiles a document.
    ///
    /// `Some(document)` is a save of that document and only compiles when
    /// the active credential profile deploys on save. `None` is an explicit
    /// user command and compiles the focused editor document.
    ///
    /// Every reason not to compile (configuration not ready, deploy on save
    /// disabled, no document, unknown file layout, excluded path) returns
    /// without touching diagnostics or reporting a status. Otherwise exactly
    /// one exclusive job is submitted under the document URI.
    pub fn compile(&self, saved: Option<Document>) {
        let Some((document, artifact)) = self.prepare(saved) else {
            return;
        };
        let key = document.uri_key();
        debug!(
            target: DISPATCH_TARGET,
            key = key.as_str(),
            kind = artifact.kind().as_str(),
            "scheduling compile"
        );
        let deployer = Arc::clone(&self.deployer);
        self.scheduler.start_long_job(
            key,
            true,
            Box::new(move || deployer.deploy(&document, &artifact)),
        );
    }

    fn prepare(&self, saved: Option<Document>) -> Option<(Document, Artifact)> {
        let config = match self.config.extension_config() {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %error,
                    "extension configuration unreadable"
                );
                return None;
            }
        };
        if !config.stored {
            return skip("credentials not stored");
        }
        if config.active_credential().is_none() {
            return skip("active credential profile missing");
        }
        if saved.is_some() && !config.deploy_on_save() {
            return skip("deploy on save disabled");
        }

        let Some(document) = saved.or_else(|| self.editor.active_document()) else {
            return skip("no document to compile");
        };
        let Some(artifact) = classify(&document) else {
            return skip("not a deployable file");
        };

        let project = match self.config.project_config() {
            Ok(project) => project,
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %error,
                    "project configuration unreadable"
                );
                return None;
            }
        };
        let root = self.editor.workspace_root();
        let relative = workspace_relative_path(&document, root.as_deref().map(Utf8Path::as_str));
        if project.exclude_matcher().is_excluded(&relative) {
            return skip("excluded by project configuration");
        }

        Some((document, artifact))
    }
}

fn skip<T>(reason: &'static str) -> Option<T> {
    debug!(target: DISPATCH_TARGET, reason, "compile skipped");
    None
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Dispatcher")
            .field("deployer", &self.deployer)
            .finish_non_exhaustive()
    }
}
