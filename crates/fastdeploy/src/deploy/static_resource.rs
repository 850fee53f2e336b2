use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tracing::{debug, info};

use crate::artifact::StaticResourceTarget;
use crate::document::Document;
use crate::jobs::CompileStatus;
use crate::remote::{RemoteConnector, RemoteError};

use super::{DEPLOY_TARGET, Deployer};

const STATIC_RESOURCE: &str = "StaticResource";

impl Deployer {
    pub(super) fn deploy_static_resource(
        &self,
        document: &Document,
        target: &StaticResourceTarget,
    ) -> CompileStatus {
        upsert_body(self.remote.as_ref(), document, target).unwrap_or_else(|error| {
            self.alert(document, error.message());
            CompileStatus::Failed
        })
    }
}

/// Replaces the resource body. A resource missing from the org is skipped.
fn upsert_body(
    remote: &dyn RemoteConnector,
    document: &Document,
    target: &StaticResourceTarget,
) -> Result<CompileStatus, RemoteError> {
    let existing = remote.query(&target.lookup_query())?;
    let Some(id) = existing.first_id() else {
        debug!(
            target: DEPLOY_TARGET,
            name = target.name.as_str(),
            "static resource not on server, skipping"
        );
        return Ok(CompileStatus::Skipped);
    };

    info!(target: DEPLOY_TARGET, path = %document.path(), "updating");
    remote.upsert_object(
        STATIC_RESOURCE,
        &json!({ "Id": id, "Body": STANDARD.encode(document.text()) }),
    )?;
    Ok(CompileStatus::Succeeded)
}
