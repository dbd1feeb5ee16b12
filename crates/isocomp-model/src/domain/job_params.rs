use serde::{Deserialize, Serialize};

use crate::{JobId, TriggerKind};

/// Identity of one trigger invocation.
///
/// Handed to the coordinator on start and returned untouched to the completion sink,
/// so the host can match the report to the activation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobParams {
    pub job_id: JobId,
    pub trigger: TriggerKind,
}

impl JobParams {
    /// Build params for a scheduler activation, deriving the trigger kind from the id.
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            trigger: TriggerKind::from_job_id(job_id),
        }
    }
}

impl From<JobId> for JobParams {
    fn from(job_id: JobId) -> Self {
        Self::new(job_id)
    }
}
