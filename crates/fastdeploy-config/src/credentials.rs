//! Stored credential profiles and the extension-level configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// A single credential profile.
///
/// Authentication material is owned by the remote client; this type only
/// carries the fields the deployment pipeline consults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Login name shown in logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Login endpoint of the org.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether saving a file deploys it to the org.
    #[serde(default)]
    pub deploy_on_save: bool,
}

/// Extension configuration for one workspace.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Whether credentials have been stored for this workspace. Nothing is
    /// deployed until this is set.
    #[serde(default)]
    pub stored: bool,
    /// Credential profiles keyed by profile identifier.
    #[serde(default)]
    pub credentials: BTreeMap<String, Credential>,
    /// Identifier of the active profile.
    #[serde(default)]
    pub current_credential: String,
    /// Logging preferences.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExtensionConfig {
    /// Returns the profile named by [`Self::current_credential`], if present.
    #[must_use]
    pub fn active_credential(&self) -> Option<&Credential> {
        self.credentials.get(&self.current_credential)
    }

    /// Whether the active profile deploys on save. A dangling profile name
    /// reads as disabled.
    #[must_use]
    pub fn deploy_on_save(&self) -> bool {
        self.active_credential()
            .is_some_and(|credential| credential.deploy_on_save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_document() {
        let json = r#"{
            "stored": true,
            "currentCredential": "dev",
            "credentials": {
                "dev": { "username": "dev@example.com", "deployOnSave": true },
                "prod": { "username": "prod@example.com" }
            }
        }"#;
        let config: ExtensionConfig = serde_json::from_str(json).expect("config parses");

        assert!(config.stored);
        assert!(config.deploy_on_save());
        let prod = config.credentials.get("prod").expect("prod profile");
        assert!(!prod.deploy_on_save);
    }

    #[test]
    fn dangling_profile_does_not_deploy_on_save() {
        let config = ExtensionConfig {
            stored: true,
            current_credential: String::from("missing"),
            ..ExtensionConfig::default()
        };

        assert!(config.active_credential().is_none());
        assert!(!config.deploy_on_save());
    }

    #[test]
    fn empty_document_is_not_stored() {
        let config: ExtensionConfig = serde_json::from_str("{}").expect("config parses");
        assert!(!config.stored);
        assert!(config.credentials.is_empty());
    }
}
