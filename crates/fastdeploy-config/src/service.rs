//! Configuration sources consulted on every compile.

use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;

use crate::credentials::ExtensionConfig;
use crate::defaults::{EXTENSION_CONFIG_FILE, PROJECT_CONFIG_FILE};
use crate::error::ConfigError;
use crate::project::ProjectConfig;

/// Trait abstracting configuration loading for testability.
///
/// Both documents are read fresh on each call; implementations must not
/// cache, so edits to the files take effect on the next save.
pub trait ConfigService: Send + Sync {
    /// Loads the extension configuration (credentials and logging).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the document exists but cannot be read
    /// or parsed.
    fn extension_config(&self) -> Result<ExtensionConfig, ConfigError>;

    /// Loads the project configuration (exclusion globs).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the document exists but cannot be read
    /// or parsed.
    fn project_config(&self) -> Result<ProjectConfig, ConfigError>;
}

/// Reads both documents from a workspace folder.
///
/// A missing file yields the default value, so a workspace without stored
/// credentials reads as "not stored" rather than failing.
#[derive(Debug, Clone)]
pub struct WorkspaceConfigService {
    root: Utf8PathBuf,
}

impl WorkspaceConfigService {
    /// Builds a service rooted at the workspace folder.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace folder the documents are resolved against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.root.as_path()
    }
}

impl ConfigService for WorkspaceConfigService {
    fn extension_config(&self) -> Result<ExtensionConfig, ConfigError> {
        read_optional_json(&self.root.join(EXTENSION_CONFIG_FILE))
    }

    fn project_config(&self) -> Result<ProjectConfig, ConfigError> {
        read_optional_json(&self.root.join(PROJECT_CONFIG_FILE))
    }
}

/// Serves fixed configuration values.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigService {
    extension: ExtensionConfig,
    project: ProjectConfig,
}

impl StaticConfigService {
    /// Builds a service returning the supplied documents.
    #[must_use]
    pub const fn new(extension: ExtensionConfig, project: ProjectConfig) -> Self {
        Self { extension, project }
    }
}

impl ConfigService for StaticConfigService {
    fn extension_config(&self) -> Result<ExtensionConfig, ConfigError> {
        Ok(self.extension.clone())
    }

    fn project_config(&self) -> Result<ProjectConfig, ConfigError> {
        Ok(self.project.clone())
    }
}

fn read_optional_json<T>(path: &Utf8Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(error) => return Err(ConfigError::read(path.to_path_buf(), error)),
    };
    serde_json::from_str(&contents).map_err(|error| ConfigError::parse(path.to_path_buf(), error))
}
