use isocomp_core::CompletionSink;
use isocomp_model::{JobParams, Outcome};
use tracing::{info, warn};

/// Completion sink that only logs.
pub struct LoggingSink;

impl CompletionSink for LoggingSink {
    fn job_finished(&self, params: &JobParams, outcome: Outcome, want_reschedule: bool) {
        if outcome.is_success() {
            info!(
                job = %params.job_id,
                trigger = params.trigger.kind(),
                want_reschedule,
                "job finished"
            );
        } else {
            warn!(
                job = %params.job_id,
                trigger = params.trigger.kind(),
                want_reschedule,
                "job failed"
            );
        }
    }
}
