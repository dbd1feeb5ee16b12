//! Registration of the two compilation triggers with the host scheduler.

use isocomp_model::{DAILY_JOB_ID, JobConstraints, JobInfo, STAGED_APEX_JOB_ID};
use tracing::{debug, error};

use crate::{config::JobConfig, error::CoreError, host::JobScheduler};

/// Register the periodic job: once per `daily_interval_ms`, only while idle and charging.
pub fn schedule_daily_job(
    scheduler: &dyn JobScheduler,
    config: &JobConfig,
) -> Result<(), CoreError> {
    let constraints = JobConstraints {
        requires_device_idle: true,
        requires_charging: true,
        ..Default::default()
    };
    let info = JobInfo::periodic(DAILY_JOB_ID, config.daily_interval_ms, constraints)?;
    submit(scheduler, info)
}

/// Register the one-shot job run after APEXes are staged.
///
/// The minimum latency leaves room for further APEXes to be staged first. Compilation
/// consumes CPU, battery and storage, hence the constraints.
pub fn schedule_staged_apex_job(
    scheduler: &dyn JobScheduler,
    config: &JobConfig,
) -> Result<(), CoreError> {
    let constraints = JobConstraints {
        requires_device_idle: true,
        requires_battery_not_low: true,
        requires_storage_not_low: true,
        ..Default::default()
    };
    let info = JobInfo::one_shot(
        STAGED_APEX_JOB_ID,
        config.staged_apex_min_latency_ms,
        constraints,
    );
    submit(scheduler, info)
}

pub fn is_staged_apex_job_scheduled(scheduler: &dyn JobScheduler) -> bool {
    scheduler.pending_job(STAGED_APEX_JOB_ID).is_some()
}

fn submit(scheduler: &dyn JobScheduler, info: JobInfo) -> Result<(), CoreError> {
    let job = info.id;
    match scheduler.schedule(info) {
        Ok(()) => {
            debug!(%job, "job scheduled");
            Ok(())
        }
        Err(source) => {
            error!(%job, error = %source, "failed to schedule job");
            Err(CoreError::Schedule { job, source })
        }
    }
}
