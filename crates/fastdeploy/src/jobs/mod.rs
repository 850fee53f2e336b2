//! Per-document compile job serialisation and terminal status reporting.
//!
//! A compile is packaged as a [`CompileJob`]: a closure returning its
//! [`CompileStatus`]. Schedulers run the closure and hand the returned status
//! to a [`StatusReporter`], so each submitted job produces exactly one
//! terminal report however the compile ends.

mod queue;

use std::fmt;
use std::sync::Arc;

use tracing::info;

pub use queue::KeyedJobQueue;

pub(crate) const JOBS_TARGET: &str = "fastdeploy::jobs";

/// Terminal outcome of a compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileStatus {
    /// The artefact was accepted by the remote org.
    Succeeded,
    /// The remote org rejected the artefact or the request failed.
    Failed,
    /// Nothing was deployed.
    Skipped,
}

impl CompileStatus {
    /// Short token shown in the status bar.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Succeeded => "👍🏻",
            Self::Failed => "👎🏻",
            Self::Skipped => "",
        }
    }

    /// Stable lower-case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CompileStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.token())
    }
}

/// A compile packaged for a scheduler.
pub type CompileJob = Box<dyn FnOnce() -> CompileStatus + Send + 'static>;

/// Receives job lifecycle events.
pub trait StatusReporter: Send + Sync {
    /// A job for `key` began running.
    fn job_started(&self, key: &str);

    /// A job for `key` ended with `status`.
    fn job_finished(&self, key: &str, status: CompileStatus);
}

impl<T> StatusReporter for Arc<T>
where
    T: StatusReporter,
{
    fn job_started(&self, key: &str) {
        (**self).job_started(key);
    }

    fn job_finished(&self, key: &str, status: CompileStatus) {
        (**self).job_finished(key, status);
    }
}

/// Runs compile jobs keyed by document URI.
pub trait JobScheduler: Send + Sync {
    /// Submits `job` under `key`.
    ///
    /// An `exclusive` job supersedes work still queued for the same key.
    fn start_long_job(&self, key: String, exclusive: bool, job: CompileJob);
}

impl fmt::Debug for dyn JobScheduler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("JobScheduler")
    }
}

/// Reports job lifecycle events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusReporter;

impl StatusReporter for TracingStatusReporter {
    fn job_started(&self, key: &str) {
        info!(target: JOBS_TARGET, event = "job_started", key, "compiling");
    }

    fn job_finished(&self, key: &str, status: CompileStatus) {
        info!(
            target: JOBS_TARGET,
            event = "job_finished",
            key,
            status = status.as_str(),
            token = status.token(),
            "compile finished"
        );
    }
}

/// Runs each job to completion on the submitting thread.
#[derive(Debug, Default)]
pub struct InlineScheduler<R> {
    reporter: R,
}

impl<R: StatusReporter> InlineScheduler<R> {
    /// Builds a scheduler reporting to `reporter`.
    #[must_use]
    pub const fn new(reporter: R) -> Self {
        Self { reporter }
    }

    /// Reporter receiving job events.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }
}

impl<R: StatusReporter> JobScheduler for InlineScheduler<R> {
    fn start_long_job(&self, key: String, _exclusive: bool, job: CompileJob) {
        self.reporter.job_started(&key);
        let status = job();
        self.reporter.job_finished(&key, status);
    }
}
