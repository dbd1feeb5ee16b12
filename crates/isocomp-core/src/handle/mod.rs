//! Lifecycle of one remote compilation task.
//!
//! Three actors touch a handle: the starter (worker thread), the canceller (caller's stop)
//! and remote notifications (success, failure, death) on transport threads.
//! They coordinate only through atomic take-and-clear of `remote_task` plus two
//! monotonic flags, so whichever actor wins the exchange acts and the others no-op.

mod state;
pub use state::HandleState;
use state::AtomicState;

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use arc_swap::ArcSwapOption;
use isocomp_model::{JobParams, TriggerKind};
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    coordinator::ActiveJob,
    error::CoreError,
    remote::{CompilationTask, CompilationTaskCallback, LivenessWatcher, ServiceLocator},
};

/// Receives the outcome forwarded by a task handle that was not cancelled.
pub(crate) trait OutcomeListener: Send + Sync {
    fn on_task_outcome(&self, job: Arc<ActiveJob>, succeeded: bool);
}

// `ArcSwapOption` needs a sized payload.
struct RemoteTask(Arc<dyn CompilationTask>);

/// Local tracker of one outstanding remote compilation attempt.
pub struct CompilationTaskHandle {
    params: JobParams,
    remote_task: ArcSwapOption<RemoteTask>,
    /// Set once by `stop`, never cleared.
    stop_requested: AtomicBool,
    /// Set once when a live reference was cancelled; suppresses every later outcome.
    canceled: AtomicBool,
    state: AtomicState,
    job: Weak<ActiveJob>,
    listener: Weak<dyn OutcomeListener>,
}

impl CompilationTaskHandle {
    pub(crate) fn new(
        params: JobParams,
        job: Weak<ActiveJob>,
        listener: Weak<dyn OutcomeListener>,
    ) -> Self {
        Self {
            params,
            remote_task: ArcSwapOption::empty(),
            stop_requested: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
            state: AtomicState::new(HandleState::Idle),
            job,
            listener,
        }
    }

    pub fn params(&self) -> &JobParams {
        &self.params
    }

    pub fn state(&self) -> HandleState {
        self.state.load()
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Connect to the service and start the remote task.
    ///
    /// Blocks while the service is located and the start call runs, so this belongs on
    /// the worker thread. A stop that arrived before the reference existed is honoured
    /// here, right after the reference is stored.
    #[instrument(
        level = "debug",
        skip(self, locator),
        fields(job = %self.params.job_id, kind = self.params.trigger.kind())
    )]
    pub fn start(
        self: &Arc<Self>,
        locator: &dyn ServiceLocator,
        service_name: &str,
    ) -> Result<(), CoreError> {
        if !self.state.transition(HandleState::Idle, HandleState::Starting) {
            return Err(CoreError::AlreadyStarted);
        }

        let res = self.connect_and_start(locator, service_name);
        if res.is_err() {
            self.state.finish(HandleState::Failed);
        }
        res
    }

    fn connect_and_start(
        self: &Arc<Self>,
        locator: &dyn ServiceLocator,
        service_name: &str,
    ) -> Result<(), CoreError> {
        let service = locator
            .wait_for_service(service_name)
            .ok_or_else(|| CoreError::ServiceUnavailable(service_name.to_string()))?;

        let callback: Arc<dyn CompilationTaskCallback> = self.clone();
        let task = match self.params.trigger {
            TriggerKind::Periodic => service.start_test_compile(callback),
            TriggerKind::OneShot => service.start_staged_apex_compile(callback),
        }
        .map_err(CoreError::RemoteStart)?;

        self.remote_task.store(Some(Arc::new(RemoteTask(Arc::clone(&task)))));

        let watcher: Weak<Self> = Arc::downgrade(self);
        let watcher: Weak<dyn LivenessWatcher> = watcher;
        task.watch_liveness(watcher).map_err(CoreError::RemoteStart)?;

        if self.state.transition(HandleState::Starting, HandleState::Armed) {
            debug!("compilation task armed");
        } else if self.state() != HandleState::Canceled {
            // Resolved before the start call returned; the reference is stale.
            self.remote_task.swap(None);
            trace!(state = ?self.state(), "task resolved while starting");
        }

        if self.is_stop_requested() {
            debug!("stop requested while starting; cancelling now");
            self.cancel_task();
        }
        Ok(())
    }

    /// Request a stop. Idempotent; cancels the remote task if it already exists.
    pub fn stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        self.cancel_task();
    }

    fn cancel_task(&self) {
        let Some(remote) = self.remote_task.swap(None) else {
            trace!(job = %self.params.job_id, "no remote task to cancel");
            return;
        };
        self.canceled.store(true, Ordering::SeqCst);
        self.state.finish(HandleState::Canceled);

        info!(job = %self.params.job_id, "cancelling compilation task");
        if let Err(e) = remote.0.cancel() {
            // The remote side is most likely failing on its own already.
            warn!(job = %self.params.job_id, error = %e, "failed to cancel compilation task");
        }
    }

    fn resolve(&self, succeeded: bool) {
        self.remote_task.swap(None);

        if self.is_canceled() {
            debug!(job = %self.params.job_id, succeeded, "task was cancelled; outcome suppressed");
            return;
        }

        let terminal = if succeeded {
            HandleState::Completed
        } else {
            HandleState::Failed
        };
        if !self.state.finish(terminal) {
            trace!(job = %self.params.job_id, succeeded, "duplicate notification ignored");
            return;
        }

        match (self.job.upgrade(), self.listener.upgrade()) {
            (Some(job), Some(listener)) => listener.on_task_outcome(job, succeeded),
            _ => trace!(job = %self.params.job_id, "job released before outcome arrived"),
        }
    }
}

impl CompilationTaskCallback for CompilationTaskHandle {
    fn on_success(&self) {
        self.resolve(true);
    }

    fn on_failure(&self) {
        self.resolve(false);
    }
}

impl LivenessWatcher for CompilationTaskHandle {
    fn on_remote_died(&self) {
        warn!(job = %self.params.job_id, "compilation task process died");
        self.resolve(false);
    }
}
