//! Errors raised while loading configuration documents.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::ConfigService`] implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        /// File that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// The configuration file is not valid JSON for the expected shape.
    #[error("failed to parse configuration '{path}': {source}")]
    Parse {
        /// File that was parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

impl ConfigError {
    pub(crate) fn read(path: Utf8PathBuf, source: std::io::Error) -> Self {
        Self::Read {
            path,
            source: Arc::new(source),
        }
    }

    pub(crate) fn parse(path: Utf8PathBuf, source: serde_json::Error) -> Self {
        Self::Parse {
            path,
            source: Arc::new(source),
        }
    }

    /// File the error refers to.
    #[must_use]
    pub const fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
