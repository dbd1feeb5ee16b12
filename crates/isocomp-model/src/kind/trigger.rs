use serde::{Deserialize, Serialize};

use crate::{DAILY_JOB_ID, JobId};

/// How a compilation job was activated.
///
/// The kind selects which remote start operation the task handle invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    /// Fixed-interval activation (the daily job).
    Periodic,
    /// Latency-bounded activation fired once after staged APEXes appear.
    OneShot,
}

impl TriggerKind {
    /// Resolve the trigger kind from a scheduler job id.
    ///
    /// Only the daily job is periodic; every other id is treated as a one-shot activation.
    pub fn from_job_id(id: JobId) -> Self {
        if id == DAILY_JOB_ID {
            TriggerKind::Periodic
        } else {
            TriggerKind::OneShot
        }
    }

    /// Short symbolic name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TriggerKind::Periodic => "periodic",
            TriggerKind::OneShot => "oneshot",
        }
    }
}
