//! Collaborator seams for the remote org and the payload shapes they exchange.
//!
//! The compile core never talks to the network itself. Hosts supply a
//! [`RemoteConnector`] for object lookups and upserts and a [`ToolingService`]
//! for the two-step container compile. All record types mirror the platform's
//! PascalCase JSON field names.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::artifact::{AuraDefType, ContainerType, LwcDefType};

/// Errors reported by remote collaborators.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl RemoteError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Raw message returned by the remote side.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// An `AuraDefinition` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuraDefinitionRecord {
    /// Record identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning bundle identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aura_definition_bundle_id: Option<String>,
    /// Definition type, for example `CONTROLLER`.
    #[serde(default)]
    pub def_type: String,
    /// Source format, for example `JS` or `XML`.
    #[serde(default)]
    pub format: String,
    /// Definition source text.
    #[serde(default)]
    pub source: String,
}

/// A `LightningComponentResource` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LwcResourceRecord {
    /// Record identifier; absent for resources not yet on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning bundle identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightning_component_bundle_id: Option<String>,
    /// Bundle-relative path such as `lwc/card/card.js`.
    #[serde(default)]
    pub file_path: String,
    /// Resource format (`js`, `html`, `css`, `svg`).
    #[serde(default)]
    pub format: String,
    /// Resource source text.
    #[serde(default)]
    pub source: String,
}

/// Result of a SOQL query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Matching rows.
    #[serde(default)]
    pub records: Vec<Value>,
}

impl QueryResult {
    /// `Id` of the first row, if any.
    #[must_use]
    pub fn first_id(&self) -> Option<&str> {
        self.records.first()?.get("Id")?.as_str()
    }
}

/// A container member submitted through the tooling compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerMember {
    /// Full source text.
    pub body: String,
    /// Member name (the file stem).
    pub full_name: String,
}

/// Outcome of a container async request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContainerAsyncResult {
    /// Request state; `Completed` means the member compiled.
    #[serde(rename = "State", default)]
    pub state: String,
    /// Deployment details, when the platform returned any.
    #[serde(rename = "DeployDetails", default)]
    pub deploy_details: Option<DeployDetails>,
}

impl ContainerAsyncResult {
    /// State value reported for a successful compile.
    pub const COMPLETED: &'static str = "Completed";

    /// Whether the member compiled.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == Self::COMPLETED
    }

    /// Component failures, empty when no details were returned.
    #[must_use]
    pub fn component_failures(&self) -> &[ComponentFailure] {
        self.deploy_details
            .as_ref()
            .map(|details| details.component_failures.as_slice())
            .unwrap_or_default()
    }
}

/// Deployment details of a container async request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeployDetails {
    /// Per-component problems in reporting order.
    #[serde(rename = "componentFailures", default)]
    pub component_failures: Vec<ComponentFailure>,
}

/// A single component problem from a tooling compile.
///
/// The platform is inconsistent about field casing, so both spellings are
/// kept. Numeric fields accept numbers or numeric strings; anything else
/// reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComponentFailure {
    /// One-based line number.
    #[serde(rename = "lineNumber", default, deserialize_with = "lenient_number")]
    pub line_number: Option<i64>,
    /// One-based line number, capitalised spelling.
    #[serde(rename = "LineNumber", default, deserialize_with = "lenient_number")]
    pub legacy_line_number: Option<i64>,
    /// One-based column number.
    #[serde(rename = "columnNumber", default, deserialize_with = "lenient_number")]
    pub column_number: Option<i64>,
    /// Problem description.
    #[serde(default)]
    pub problem: String,
    /// `Warning` or `Error`; drives the diagnostic severity.
    #[serde(rename = "problemType", default)]
    pub problem_type: Option<String>,
    /// Capitalised problem type; `Error` records are reported elsewhere.
    #[serde(rename = "ProblemType", default)]
    pub legacy_problem_type: Option<String>,
}

impl ComponentFailure {
    /// The first non-zero line number across both spellings, defaulting to 1.
    #[must_use]
    pub fn line_number(&self) -> i64 {
        [self.line_number, self.legacy_line_number]
            .into_iter()
            .flatten()
            .find(|line| *line != 0)
            .unwrap_or(1)
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Object lookups and upserts against the remote org.
pub trait RemoteConnector: Send + Sync {
    /// Finds the Aura definition of `def_type` in the named bundle.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the lookup fails.
    fn find_aura_definition(
        &self,
        bundle_name: &str,
        def_type: AuraDefType,
    ) -> Result<Option<AuraDefinitionRecord>, RemoteError>;

    /// Updates an Aura definition.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] carrying the compiler message on failure.
    fn upsert_aura_definition(&self, record: &AuraDefinitionRecord) -> Result<(), RemoteError>;

    /// Finds the identifier of the named Lightning component bundle.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the lookup fails.
    fn find_lwc_bundle_id(&self, bundle_name: &str) -> Result<Option<String>, RemoteError>;

    /// Finds a bundle resource by format and bundle-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the lookup fails.
    fn find_lwc_resource(
        &self,
        bundle_name: &str,
        format: LwcDefType,
        file_path: &str,
    ) -> Result<Option<LwcResourceRecord>, RemoteError>;

    /// Creates or updates a bundle resource.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] carrying the compiler message on failure.
    fn upsert_lwc_resource(&self, record: &LwcResourceRecord) -> Result<(), RemoteError>;

    /// Creates or updates an arbitrary object.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the upsert fails.
    fn upsert_object(&self, object_type: &str, fields: &Value) -> Result<(), RemoteError>;

    /// Runs a SOQL query.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the query fails.
    fn query(&self, soql: &str) -> Result<QueryResult, RemoteError>;
}

impl fmt::Debug for dyn RemoteConnector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("RemoteConnector")
    }
}

/// Entry point of the two-step tooling compile.
pub trait ToolingService: Send + Sync {
    /// Opens a compile request.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the request cannot be created.
    fn request_compile(&self) -> Result<Box<dyn ContainerCompiler>, RemoteError>;
}

impl fmt::Debug for dyn ToolingService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ToolingService")
    }
}

/// An open tooling compile request.
pub trait ContainerCompiler: Send {
    /// Submits a member and waits for the async request to settle.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport or protocol failures. Compile
    /// problems are reported in the returned result instead.
    fn compile(
        &mut self,
        container_type: ContainerType,
        member: &ContainerMember,
    ) -> Result<ContainerAsyncResult, RemoteError>;
}
