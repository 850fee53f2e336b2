//! Save-triggered compile dispatch for platform source files.
//!
//! When a developer saves a file, the [`Dispatcher`] decides whether it should
//! be deployed, classifies it into an [`Artifact`], and schedules a compile job
//! keyed by the document URI. The [`Deployer`] drives the upsert protocol for
//! the artefact kind and maps remote failures into editor diagnostics.
//!
//! Everything outside the core sits behind traits: configuration
//! ([`fastdeploy_config::ConfigService`]), the remote org ([`RemoteConnector`]
//! and [`ToolingService`]), the editor ([`EditorHost`], [`DiagnosticsSink`],
//! [`Notifier`]), and job scheduling ([`JobScheduler`]). Hosts wire concrete
//! implementations; tests wire recording doubles.

pub mod artifact;
pub mod diagnostics;
mod deploy;
mod dispatcher;
pub mod document;
mod errors;
mod host;
pub mod jobs;
pub mod metadata;
pub mod remote;
pub mod telemetry;

pub use artifact::{Artifact, ArtifactKind, classify, workspace_relative_path};
pub use deploy::Deployer;
pub use diagnostics::{NormalizedDiagnostic, Severity};
pub use dispatcher::Dispatcher;
pub use document::{Document, DocumentError};
pub use errors::DeployError;
pub use host::{DiagnosticsSink, EditorHost, Notifier};
pub use jobs::{
    CompileJob, CompileStatus, InlineScheduler, JobScheduler, KeyedJobQueue, StatusReporter,
    TracingStatusReporter,
};
pub use metadata::MetadataError;
pub use remote::{RemoteConnector, RemoteError, ToolingService};

#[cfg(test)]
mod tests;
