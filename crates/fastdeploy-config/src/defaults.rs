//! Default values and well-known file locations.

/// Default log filter expression used when the configuration omits one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Extension configuration file, relative to the workspace root.
pub const EXTENSION_CONFIG_FILE: &str = ".vscode/fastdeploy.json";

/// Project configuration file holding exclusion globs, relative to the
/// workspace root.
pub const PROJECT_CONFIG_FILE: &str = ".sfdy.json";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}
