//! Errors raised while deploying a single artefact.

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::remote::RemoteError;

/// Failure of one deployment attempt.
///
/// The display text is the raw message surfaced to the user, either parsed
/// into a diagnostic or shown as an alert.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The artefact has no counterpart on the server.
    #[error("File not found on Salesforce server")]
    NotFoundOnServer {
        /// Remote object type that was looked up.
        object_type: &'static str,
        /// Name used for the lookup.
        name: String,
    },
    /// A remote call failed.
    #[error("{source}")]
    Remote {
        /// Collaborator error.
        #[from]
        source: RemoteError,
    },
    /// Bundle metadata could not be read.
    #[error("{source}")]
    Metadata {
        /// Parser error.
        #[from]
        source: MetadataError,
    },
}

impl DeployError {
    pub(crate) fn not_found(object_type: &'static str, name: &str) -> Self {
        Self::NotFoundOnServer {
            object_type,
            name: name.to_owned(),
        }
    }
}
