pub mod error;
pub use error::{CoreError, RemoteError, ScheduleError};

pub mod config;
pub use config::JobConfig;

pub mod remote;
pub use remote::{
    CompilationTask, CompilationTaskCallback, LivenessWatcher, RemoteCompilationService,
    ServiceLocator,
};

pub mod host;
pub use host::{CompletionSink, JobScheduler};

pub mod handle;
pub use handle::{CompilationTaskHandle, HandleState};

pub mod coordinator;
pub use coordinator::{JobCoordinator, JobCoordinatorBuilder};

pub mod schedule;
pub use schedule::{is_staged_apex_job_scheduled, schedule_daily_job, schedule_staged_apex_job};

#[cfg(test)]
pub(crate) mod testing;
