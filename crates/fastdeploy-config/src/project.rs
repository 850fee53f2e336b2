//! Project configuration and the exclusion glob matcher.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Project-level settings read from `.sfdy.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Glob patterns, relative to the project's `src/` folder, for files that
    /// are never deployed on save.
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

impl ProjectConfig {
    /// Compiles the exclusion patterns into a matcher.
    #[must_use]
    pub fn exclude_matcher(&self) -> ExcludeMatcher {
        ExcludeMatcher::new(&self.exclude_files)
    }
}

/// Matches workspace-relative paths against the exclusion globs.
///
/// Patterns follow minimatch conventions: `*` and `?` stop at `/`, while `**`
/// spans directories. Unlike minimatch, wildcards also match names starting
/// with `.`, so `classes/*.cls` excludes `classes/.Hidden.cls`. A pattern that
/// fails to compile is skipped and logged; it never prevents the remaining
/// patterns from applying.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    set: GlobSet,
}

impl ExcludeMatcher {
    /// Builds a matcher from raw glob patterns.
    #[must_use]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for raw in patterns {
            let pattern = raw.as_ref();
            match GlobBuilder::new(pattern).literal_separator(true).build() {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(error) => warn!(
                    target: "fastdeploy_config::project",
                    pattern,
                    %error,
                    "ignoring invalid exclusion glob"
                ),
            }
        }
        let set = builder.build().unwrap_or_else(|error| {
            warn!(
                target: "fastdeploy_config::project",
                %error,
                "exclusion globs failed to compile; nothing is excluded"
            );
            GlobSet::empty()
        });
        Self { set }
    }

    /// Whether `relative_path` matches any exclusion pattern.
    #[must_use]
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.set.is_match(relative_path)
    }
}
