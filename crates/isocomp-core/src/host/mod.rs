use isocomp_model::{JobId, JobInfo, JobParams, Outcome};

use crate::error::ScheduleError;

/// Host-side receiver of job completion.
///
/// Called at most once per accepted start. A stop that interrupted the job is
/// signalled through the return value of `on_stop` instead.
pub trait CompletionSink: Send + Sync {
    fn job_finished(&self, params: &JobParams, outcome: Outcome, want_reschedule: bool);
}

/// Trigger scheduler that activates jobs.
pub trait JobScheduler: Send + Sync {
    fn schedule(&self, info: JobInfo) -> Result<(), ScheduleError>;

    /// Registration still waiting to fire, if any.
    fn pending_job(&self, id: JobId) -> Option<JobInfo>;
}
