mod job;
pub(crate) use job::ActiveJob;

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Weak},
};

use arc_swap::ArcSwapOption;
use isocomp_model::{JobParams, Outcome};
use tokio::runtime::Handle;
use tracing::{debug, error, info, info_span, instrument, warn};

use crate::{
    config::JobConfig,
    error::CoreError,
    handle::{HandleState, OutcomeListener},
    host::CompletionSink,
    remote::ServiceLocator,
};

/// Single-slot coordinator for isolated compilation jobs.
///
/// Holds at most one active job. Start and stop come from the host (never concurrently
/// with each other); outcomes come from remote notification threads. Every slot mutation is
/// one atomic swap or compare-and-swap, so callers never block on each other.
pub struct JobCoordinator {
    shared: Arc<Shared>,
    runtime: Handle,
}

struct Shared {
    slot: ArcSwapOption<ActiveJob>,
    locator: Arc<dyn ServiceLocator>,
    sink: Arc<dyn CompletionSink>,
    config: JobConfig,
}

impl JobCoordinator {
    pub fn builder(
        locator: Arc<dyn ServiceLocator>,
        sink: Arc<dyn CompletionSink>,
    ) -> JobCoordinatorBuilder {
        JobCoordinatorBuilder {
            locator,
            sink,
            config: JobConfig::default(),
            runtime: None,
        }
    }

    /// Accept a trigger invocation.
    ///
    /// Returns `false` when another job is in progress: the invocation is already finished and
    /// the running job is left untouched. Otherwise the remote start is dispatched to a blocking
    /// worker and `true` means the outcome will be reported through the [`CompletionSink`].
    #[instrument(
        level = "info",
        skip(self, params),
        fields(job = %params.job_id, kind = params.trigger.kind())
    )]
    pub fn on_start(&self, params: JobParams) -> bool {
        info!("starting job");

        if self.shared.slot.load().is_some() {
            warn!("another job is in progress, skipping");
            return false;
        }

        let listener: Weak<Shared> = Arc::downgrade(&self.shared);
        let job = ActiveJob::new(params, listener as Weak<dyn OutcomeListener>);

        let prev = self
            .shared
            .slot
            .compare_and_swap(&None::<Arc<ActiveJob>>, Some(Arc::clone(&job)));
        if prev.is_some() {
            warn!("slot taken concurrently, skipping");
            return false;
        }

        let shared = Arc::clone(&self.shared);
        self.runtime.spawn_blocking(move || shared.run_starter(job));
        true
    }

    /// Interrupt the current job, if any.
    ///
    /// Returns `false` if nothing was running (no reschedule needed), `true` if a job was
    /// interrupted. No completion is reported for an interrupted job.
    #[instrument(level = "info", skip(self))]
    pub fn on_stop(&self) -> bool {
        match self.shared.slot.swap(None) {
            None => {
                debug!("no job in progress");
                false
            }
            Some(job) => {
                info!(job = %job.params().job_id, elapsed_ms = job.elapsed_ms(), "stopping job");
                job.handle().stop();
                true
            }
        }
    }

    /// Params of the job currently holding the slot.
    pub fn current_job(&self) -> Option<JobParams> {
        self.shared.slot.load_full().map(|job| *job.params())
    }

    /// Lifecycle state of the current job's task handle.
    pub fn current_state(&self) -> Option<HandleState> {
        self.shared.slot.load_full().map(|job| job.handle().state())
    }

    pub fn config(&self) -> &JobConfig {
        &self.shared.config
    }
}

pub struct JobCoordinatorBuilder {
    locator: Arc<dyn ServiceLocator>,
    sink: Arc<dyn CompletionSink>,
    config: JobConfig,
    runtime: Option<Handle>,
}

impl JobCoordinatorBuilder {
    #[inline]
    pub fn with_config(mut self, config: JobConfig) -> Self {
        self.config = config;
        self
    }

    /// Runtime whose blocking pool runs the start sequence.
    ///
    /// Defaults to the runtime `build` is called from.
    #[inline]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<JobCoordinator, CoreError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| CoreError::NoRuntime)?,
        };

        Ok(JobCoordinator {
            shared: Arc::new(Shared {
                slot: ArcSwapOption::empty(),
                locator: self.locator,
                sink: self.sink,
                config: self.config,
            }),
            runtime,
        })
    }
}

impl Shared {
    fn run_starter(self: Arc<Self>, job: Arc<ActiveJob>) {
        let span = info_span!("compilation_job_starter", job = %job.params().job_id);
        let _enter = span.enter();

        let started = panic::catch_unwind(AssertUnwindSafe(|| {
            job.handle()
                .start(self.locator.as_ref(), &self.config.service_name)
        }))
        .unwrap_or_else(|payload| {
            Err(CoreError::StarterPanicked(panic_message(payload.as_ref())))
        });

        if let Err(e) = started {
            error!(error = %e, "starting compilation job failed");
            let owned = self.release(&job);
            // In case the task started before the failure.
            job.handle().stop();
            if owned {
                self.finish(&job, Outcome::Failed);
            } else {
                debug!("job already released; no completion report");
            }
        }
    }

    /// Clear the slot only if it still holds `job`.
    fn release(&self, job: &Arc<ActiveJob>) -> bool {
        let prev = self.slot.compare_and_swap(job, None::<Arc<ActiveJob>>);
        matches!(&*prev, Some(current) if Arc::ptr_eq(current, job))
    }

    fn finish(&self, job: &ActiveJob, outcome: Outcome) {
        info!(
            job = %job.params().job_id,
            ?outcome,
            elapsed_ms = job.elapsed_ms(),
            "job finished"
        );
        // Never rescheduled; retries are the scheduler's business.
        self.sink.job_finished(job.params(), outcome, false);
    }
}

impl OutcomeListener for Shared {
    fn on_task_outcome(&self, job: Arc<ActiveJob>, succeeded: bool) {
        info!(job = %job.params().job_id, succeeded, "task outcome received");

        if !self.release(&job) {
            // Stopped already; the host has been told through `on_stop`.
            debug!(job = %job.params().job_id, "job no longer active; outcome ignored");
            return;
        }
        self.finish(&job, Outcome::from_succeeded(succeeded));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
