use serde_json::json;

use crate::artifact::{LwcDefType, LwcTarget};
use crate::document::Document;
use crate::errors::DeployError;
use crate::jobs::CompileStatus;
use crate::metadata::lwc_bundle_metadata;
use crate::remote::{LwcResourceRecord, RemoteConnector};

use super::Deployer;

const LIGHTNING_COMPONENT_BUNDLE: &str = "LightningComponentBundle";

impl Deployer {
    pub(super) fn deploy_lwc(&self, document: &Document, target: &LwcTarget) -> CompileStatus {
        match upsert_resource(self.remote.as_ref(), document, target) {
            Ok(()) => {
                self.clear(document);
                CompileStatus::Succeeded
            }
            Err(error) => {
                self.report_compiler_error(document, &error);
                CompileStatus::Failed
            }
        }
    }
}

fn upsert_resource(
    remote: &dyn RemoteConnector,
    document: &Document,
    target: &LwcTarget,
) -> Result<(), DeployError> {
    // A missing bundle is left for the platform to reject on upsert.
    let bundle_id = remote.find_lwc_bundle_id(&target.bundle_name)?;

    if target.def_type == LwcDefType::Xml {
        let metadata = lwc_bundle_metadata(document.text())?;
        remote.upsert_object(
            LIGHTNING_COMPONENT_BUNDLE,
            &json!({ "Id": bundle_id, "Metadata": metadata }),
        )?;
    }

    // The platform stores bundle metadata files as `js` resources.
    let format = target.resource_format();
    let file_path = target.file_path();
    let mut record = remote
        .find_lwc_resource(&target.bundle_name, format, &file_path)?
        .unwrap_or_else(|| LwcResourceRecord {
            lightning_component_bundle_id: bundle_id,
            file_path,
            ..LwcResourceRecord::default()
        });
    format.as_str().clone_into(&mut record.format);
    document.text().clone_into(&mut record.source);
    remote.upsert_lwc_resource(&record)?;
    Ok(())
}
