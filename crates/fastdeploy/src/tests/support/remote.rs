//! Scripted remote org doubles that record every call.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::artifact::{AuraDefType, ContainerType, LwcDefType};
use crate::remote::{
    AuraDefinitionRecord, ContainerAsyncResult, ContainerCompiler, ContainerMember,
    LwcResourceRecord, QueryResult, RemoteConnector, RemoteError, ToolingService,
};

/// A call observed by [`FakeRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// `find_aura_definition`.
    FindAura {
        /// Bundle looked up.
        bundle: String,
        /// Definition type looked up.
        def_type: AuraDefType,
    },
    /// `upsert_aura_definition`.
    UpsertAura(AuraDefinitionRecord),
    /// `find_lwc_bundle_id`.
    FindLwcBundle(String),
    /// `find_lwc_resource`.
    FindLwcResource {
        /// Bundle looked up.
        bundle: String,
        /// Resource format looked up.
        format: LwcDefType,
        /// Bundle-relative path looked up.
        file_path: String,
    },
    /// `upsert_lwc_resource`.
    UpsertLwc(LwcResourceRecord),
    /// `upsert_object`.
    UpsertObject {
        /// Object type.
        object_type: String,
        /// Submitted fields.
        fields: Value,
    },
    /// `query`.
    Query(String),
}

/// Responses served by [`FakeRemote`].
#[derive(Debug, Clone, Default)]
pub struct RemoteScript {
    /// Result of Aura definition lookups.
    pub aura_record: Option<AuraDefinitionRecord>,
    /// Result of LWC bundle lookups.
    pub lwc_bundle_id: Option<String>,
    /// Result of LWC resource lookups.
    pub lwc_resource: Option<LwcResourceRecord>,
    /// Rows returned by every query.
    pub query_records: Vec<Value>,
    /// Message every lookup and query fails with.
    pub lookup_error: Option<String>,
    /// Message every upsert fails with.
    pub upsert_error: Option<String>,
}

/// Remote connector serving a [`RemoteScript`].
#[derive(Debug, Default)]
pub struct FakeRemote {
    script: Mutex<RemoteScript>,
    calls: Mutex<Vec<RemoteCall>>,
}

impl FakeRemote {
    /// Applies `update` to the served script.
    pub fn script(&self, update: impl FnOnce(&mut RemoteScript)) {
        update(&mut self.script.lock().expect("script lock"));
    }

    /// Calls observed so far.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Records `call` and serves a lookup from the script.
    fn lookup<T>(
        &self,
        call: RemoteCall,
        serve: impl FnOnce(&RemoteScript) -> T,
    ) -> Result<T, RemoteError> {
        self.calls.lock().expect("calls lock").push(call);
        let script = self.script.lock().expect("script lock");
        match &script.lookup_error {
            Some(message) => Err(RemoteError::new(message.clone())),
            None => Ok(serve(&script)),
        }
    }

    /// Records `call` and applies the scripted upsert outcome.
    fn upsert(&self, call: RemoteCall) -> Result<(), RemoteError> {
        self.calls.lock().expect("calls lock").push(call);
        match &self.script.lock().expect("script lock").upsert_error {
            Some(message) => Err(RemoteError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl RemoteConnector for FakeRemote {
    fn find_aura_definition(
        &self,
        bundle_name: &str,
        def_type: AuraDefType,
    ) -> Result<Option<AuraDefinitionRecord>, RemoteError> {
        self.lookup(
            RemoteCall::FindAura {
                bundle: bundle_name.to_owned(),
                def_type,
            },
            |script| script.aura_record.clone(),
        )
    }

    fn upsert_aura_definition(&self, record: &AuraDefinitionRecord) -> Result<(), RemoteError> {
        self.upsert(RemoteCall::UpsertAura(record.clone()))
    }

    fn find_lwc_bundle_id(&self, bundle_name: &str) -> Result<Option<String>, RemoteError> {
        self.lookup(RemoteCall::FindLwcBundle(bundle_name.to_owned()), |script| {
            script.lwc_bundle_id.clone()
        })
    }

    fn find_lwc_resource(
        &self,
        bundle_name: &str,
        format: LwcDefType,
        file_path: &str,
    ) -> Result<Option<LwcResourceRecord>, RemoteError> {
        self.lookup(
            RemoteCall::FindLwcResource {
                bundle: bundle_name.to_owned(),
                format,
                file_path: file_path.to_owned(),
            },
            |script| script.lwc_resource.clone(),
        )
    }

    fn upsert_lwc_resource(&self, record: &LwcResourceRecord) -> Result<(), RemoteError> {
        self.upsert(RemoteCall::UpsertLwc(record.clone()))
    }

    fn upsert_object(&self, object_type: &str, fields: &Value) -> Result<(), RemoteError> {
        self.upsert(RemoteCall::UpsertObject {
            object_type: object_type.to_owned(),
            fields: fields.clone(),
        })
    }

    fn query(&self, soql: &str) -> Result<QueryResult, RemoteError> {
        self.lookup(RemoteCall::Query(soql.to_owned()), |script| QueryResult {
            records: script.query_records.clone(),
        })
    }
}

#[derive(Debug)]
struct ToolingState {
    request_error: Option<String>,
    outcome: Result<ContainerAsyncResult, String>,
    requests: usize,
    submissions: Vec<(ContainerType, ContainerMember)>,
}

impl Default for ToolingState {
    fn default() -> Self {
        Self {
            request_error: None,
            outcome: Ok(ContainerAsyncResult {
                state: String::from(ContainerAsyncResult::COMPLETED),
                deploy_details: None,
            }),
            requests: 0,
            submissions: Vec::new(),
        }
    }
}

/// Tooling service returning a scripted container result.
///
/// Compiles succeed with no failures until told otherwise.
#[derive(Debug, Default)]
pub struct FakeTooling {
    state: Arc<Mutex<ToolingState>>,
}

impl FakeTooling {
    /// Serves `result` from every compile.
    pub fn respond_with(&self, result: ContainerAsyncResult) {
        self.state.lock().expect("tooling lock").outcome = Ok(result);
    }

    /// Fails every compile submission with `message`.
    pub fn fail_compile(&self, message: &str) {
        self.state.lock().expect("tooling lock").outcome = Err(message.to_owned());
    }

    /// Fails every compile request with `message`.
    pub fn fail_request(&self, message: &str) {
        self.state.lock().expect("tooling lock").request_error = Some(message.to_owned());
    }

    /// Number of compile requests opened.
    pub fn requests(&self) -> usize {
        self.state.lock().expect("tooling lock").requests
    }

    /// Members submitted so far.
    pub fn submissions(&self) -> Vec<(ContainerType, ContainerMember)> {
        self.state.lock().expect("tooling lock").submissions.clone()
    }
}

impl ToolingService for FakeTooling {
    fn request_compile(&self) -> Result<Box<dyn ContainerCompiler>, RemoteError> {
        let mut state = self.state.lock().expect("tooling lock");
        state.requests += 1;
        if let Some(message) = &state.request_error {
            return Err(RemoteError::new(message.clone()));
        }
        Ok(Box::new(FakeCompiler {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeCompiler {
    state: Arc<Mutex<ToolingState>>,
}

impl ContainerCompiler for FakeCompiler {
    fn compile(
        &mut self,
        container_type: ContainerType,
        member: &ContainerMember,
    ) -> Result<ContainerAsyncResult, RemoteError> {
        let mut state = self.state.lock().expect("tooling lock");
        state.submissions.push((container_type, member.clone()));
        state.outcome.clone().map_err(RemoteError::new)
    }
}
