use tracing::info;

use crate::artifact::ContainerTarget;
use crate::diagnostics::map_component_failures;
use crate::document::Document;
use crate::jobs::CompileStatus;
use crate::remote::{ContainerAsyncResult, ContainerMember, RemoteError, ToolingService};

use super::{DEPLOY_TARGET, Deployer};

impl Deployer {
    pub(super) fn deploy_container(
        &self,
        document: &Document,
        target: &ContainerTarget,
    ) -> CompileStatus {
        match compile_member(self.tooling.as_ref(), document, target) {
            Ok(result) => {
                let diagnostics =
                    map_component_failures(result.component_failures(), document.line_count());
                self.publish(document, &diagnostics);
                if result.is_completed() {
                    CompileStatus::Succeeded
                } else {
                    CompileStatus::Failed
                }
            }
            Err(error) => {
                self.alert(document, error.message());
                CompileStatus::Failed
            }
        }
    }
}

fn compile_member(
    tooling: &dyn ToolingService,
    document: &Document,
    target: &ContainerTarget,
) -> Result<ContainerAsyncResult, RemoteError> {
    info!(target: DEPLOY_TARGET, path = %document.path(), "compiling");
    let mut compiler = tooling.request_compile()?;
    let member = ContainerMember {
        body: document.text().to_owned(),
        full_name: target.full_name.clone(),
    };
    let result = compiler.compile(target.container_type, &member)?;
    info!(
        target: DEPLOY_TARGET,
        path = %document.path(),
        state = result.state.as_str(),
        "done"
    );
    Ok(result)
}
