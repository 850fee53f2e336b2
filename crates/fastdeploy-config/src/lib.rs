//! Configuration model shared by the save-triggered deployment pipeline.
//!
//! Two documents configure a workspace. The extension configuration holds the
//! stored credential profiles, which profile is active, whether that profile
//! deploys on save, and logging preferences. The project configuration
//! (`.sfdy.json`) lists glob patterns for files that must never be deployed.
//!
//! Callers read both through the [`ConfigService`] trait so the compile core
//! can be driven by fixed values in tests and by files on disk in a real
//! editor session.

mod credentials;
mod defaults;
mod error;
mod logging;
mod project;
mod service;

pub use credentials::{Credential, ExtensionConfig};
pub use defaults::{
    EXTENSION_CONFIG_FILE, PROJECT_CONFIG_FILE, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use error::ConfigError;
pub use logging::{LogFormat, LogFormatParseError, LoggingConfig};
pub use project::{ExcludeMatcher, ProjectConfig};
pub use service::{ConfigService, StaticConfigService, WorkspaceConfigService};
