use std::{
    sync::{Arc, Weak},
    time::Instant,
};

use isocomp_model::JobParams;

use crate::handle::{CompilationTaskHandle, OutcomeListener};

/// Content of the coordinator's slot: one accepted trigger invocation and its task handle.
pub(crate) struct ActiveJob {
    params: JobParams,
    handle: Arc<CompilationTaskHandle>,
    accepted_at: Instant,
}

impl ActiveJob {
    /// The handle keeps a weak back-reference so outcomes can name the job they belong to.
    pub(crate) fn new(params: JobParams, listener: Weak<dyn OutcomeListener>) -> Arc<Self> {
        Arc::new_cyclic(|job| Self {
            params,
            handle: Arc::new(CompilationTaskHandle::new(params, job.clone(), listener)),
            accepted_at: Instant::now(),
        })
    }

    pub(crate) fn params(&self) -> &JobParams {
        &self.params
    }

    pub(crate) fn handle(&self) -> &Arc<CompilationTaskHandle> {
        &self.handle
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.accepted_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
