use isocomp_model::{JobId, ModelError};
use thiserror::Error;

/// Failure reported by a call into the remote compilation service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote process is dead")]
    DeadObject,
    #[error("transaction failed: {0}")]
    Transaction(String),
    #[error("service error: {0}")]
    Service(String),
}

/// Rejection returned by the trigger scheduler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("scheduler rejected job: {0}")]
    Rejected(String),
    #[error("scheduler unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unable to find service {0}")]
    ServiceUnavailable(String),

    #[error("remote start failed: {0}")]
    RemoteStart(#[source] RemoteError),

    #[error("start sequence panicked: {0}")]
    StarterPanicked(String),

    #[error("task handle was already started")]
    AlreadyStarted,

    #[error("no tokio runtime available for the starter")]
    NoRuntime,

    #[error("failed to schedule job {job}: {source}")]
    Schedule {
        job: JobId,
        #[source]
        source: ScheduleError,
    },

    #[error("invalid job registration: {0}")]
    Model(#[from] ModelError),
}
