use crate::artifact::AuraTarget;
use crate::document::Document;
use crate::errors::DeployError;
use crate::jobs::CompileStatus;
use crate::remote::RemoteConnector;

use super::Deployer;

const AURA_DEFINITION: &str = "AuraDefinition";

impl Deployer {
    pub(super) fn deploy_aura(&self, document: &Document, target: &AuraTarget) -> CompileStatus {
        match upsert_definition(self.remote.as_ref(), document, target) {
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

fn upsert_definition(
    remote: &dyn RemoteConnector,
    document: &Document,
    target: &AuraTarget,
) -> Result<(), DeployError> {
    let mut record = remote
        .find_aura_definition(&target.bundle_name, target.def_type)?
        .ok_or_else(|| DeployError::not_found(AURA_DEFINITION, &target.bundle_name))?;
    record.source = document.text().to_owned();
    remote.upsert_aura_definition(&record)?;
    Ok(())
}
