//! Background queue running at most one job per key.

use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use tracing::{debug, warn};

use super::{CompileJob, CompileStatus, JOBS_TARGET, JobScheduler, StatusReporter};

/// Runs jobs on worker threads, serialised per key.
///
/// Jobs for different keys run concurrently. Jobs for one key run in
/// submission order; an exclusive submission drops jobs still waiting for the
/// same key and reports each of them as [`CompileStatus::Skipped`]. The
/// running job is never interrupted. A job that panics is reported as
/// [`CompileStatus::Failed`].
pub struct KeyedJobQueue<R> {
    shared: Arc<Shared<R>>,
}

struct Shared<R> {
    reporter: R,
    // A key is present while its worker is alive; the deque holds jobs
    // waiting behind the running one.
    pending: Mutex<HashMap<String, VecDeque<CompileJob>>>,
    idle: Condvar,
}

impl<R: StatusReporter + 'static> KeyedJobQueue<R> {
    /// Builds a queue reporting to `reporter`.
    #[must_use]
    pub fn new(reporter: R) -> Self {
        Self {
            shared: Arc::new(Shared {
                reporter,
                pending: Mutex::new(HashMap::new()),
                idle: Condvar::new(),
            }),
        }
    }

    /// Reporter receiving job events.
    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.shared.reporter
    }

    /// Blocks until no job is running or waiting.
    pub fn wait_idle(&self) {
        let mut pending = self.shared.lock();
        while !pending.is_empty() {
            pending = self
                .shared
                .idle
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl<R> Shared<R> {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<CompileJob>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: StatusReporter + 'static> JobScheduler for KeyedJobQueue<R> {
    fn start_long_job(&self, key: String, exclusive: bool, job: CompileJob) {
        let mut superseded = Vec::new();
        {
            let mut pending = self.shared.lock();
            if let Some(waiting) = pending.get_mut(&key) {
                if exclusive {
                    superseded.extend(waiting.drain(..));
                }
                waiting.push_back(job);
                debug!(
                    target: JOBS_TARGET,
                    key = key.as_str(),
                    queued = waiting.len(),
                    "compile queued behind running job"
                );
            } else {
                pending.insert(key.clone(), VecDeque::new());
                let shared = Arc::clone(&self.shared);
                let worker_key = key.clone();
                thread::spawn(move || run_worker(&shared, &worker_key, job));
            }
        }

        for dropped in superseded {
            drop(dropped);
            self.shared
                .reporter
                .job_finished(&key, CompileStatus::Skipped);
        }
    }
}

fn run_worker<R: StatusReporter>(shared: &Shared<R>, key: &str, first: CompileJob) {
    let mut next = Some(first);
    while let Some(job) = next {
        shared.reporter.job_started(key);
        let status = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|_| {
            warn!(target: JOBS_TARGET, key, "compile job panicked");
            CompileStatus::Failed
        });
        shared.reporter.job_finished(key, status);

        let mut pending = shared.lock();
        next = pending.get_mut(key).and_then(VecDeque::pop_front);
        if next.is_none() {
            pending.remove(key);
            shared.idle.notify_all();
        }
    }
}

impl<R> std::fmt::Debug for KeyedJobQueue<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.shared.lock().len();
        formatter
            .debug_struct("KeyedJobQueue")
            .field("active_keys", &keys)
            .finish_non_exhaustive()
    }
}
