//! Upsert strategies, one per artefact kind.
//!
//! Every strategy resolves the remote identity, builds its payload, upserts
//! it, and routes the outcome to the problems panel or an alert. Strategies
//! return their [`CompileStatus`] and never report it themselves.

mod aura;
mod container;
mod lwc;
mod static_resource;

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::artifact::Artifact;
use crate::diagnostics::{NormalizedDiagnostic, parse_compiler_error, render};
use crate::document::Document;
use crate::errors::DeployError;
use crate::host::{DiagnosticsSink, Notifier};
use crate::jobs::CompileStatus;
use crate::remote::{RemoteConnector, ToolingService};

pub(crate) const DEPLOY_TARGET: &str = "fastdeploy::deploy";

/// Drives the upsert strategy matching an artefact.
#[derive(Clone)]
pub struct Deployer {
    remote: Arc<dyn RemoteConnector>,
    tooling: Arc<dyn ToolingService>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    notifier: Arc<dyn Notifier>,
}

impl Deployer {
    /// Builds a deployer over the supplied collaborators.
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteConnector>,
        tooling: Arc<dyn ToolingService>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            remote,
            tooling,
            diagnostics,
            notifier,
        }
    }

    /// Deploys `document` as `artifact` and returns the terminal status.
    ///
    /// Failures never escape: they become diagnostics, alerts, or both are
    /// skipped, according to the artefact kind.
    #[must_use]
    pub fn deploy(&self, document: &Document, artifact: &Artifact) -> CompileStatus {
        match artifact {
            Artifact::Aura(target) => self.deploy_aura(document, target),
            Artifact::LwcResource(target) => self.deploy_lwc(document, target),
            Artifact::StaticResource(target) => self.deploy_static_resource(document, target),
            Artifact::Container(target) => self.deploy_container(document, target),
        }
    }

    fn publish(&self, document: &Document, diagnostics: &[NormalizedDiagnostic]) {
        self.diagnostics
            .set(document.uri(), render(diagnostics, document));
    }

    fn clear(&self, document: &Document) {
        self.publish(document, &[]);
    }

    /// Reports a free-text compiler failure as a single diagnostic.
    fn report_compiler_error(&self, document: &Document, error: &DeployError) {
        let message = error.to_string();
        warn!(
            target: DEPLOY_TARGET,
            uri = document.uri().as_str(),
            error = %message,
            "deployment rejected"
        );
        let diagnostic =
            parse_compiler_error(&message, document.file_stem(), document.line_count());
        self.publish(document, &[diagnostic]);
    }

    fn alert(&self, document: &Document, message: &str) {
        warn!(
            target: DEPLOY_TARGET,
            uri = document.uri().as_str(),
            error = message,
            "deployment failed"
        );
        self.notifier.show_error(message);
    }
}

impl fmt::Debug for Deployer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Deployer").finish_non_exhaustive()
    }
}
