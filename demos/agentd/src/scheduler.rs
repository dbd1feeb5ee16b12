use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use isocomp_core::{JobScheduler, ScheduleError};
use isocomp_model::{JobId, JobInfo, JobParams, JobTiming};
use tokio::{runtime::Handle, sync::mpsc::UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Timer-driven scheduler: each registration fires activations on `tx`.
///
/// Constraints are logged but not evaluated.
pub struct TimerScheduler {
    pending: Arc<Mutex<HashMap<JobId, JobInfo>>>,
    tx: UnboundedSender<JobParams>,
    runtime: Handle,
    token: CancellationToken,
}

impl TimerScheduler {
    pub fn new(tx: UnboundedSender<JobParams>, runtime: Handle, token: CancellationToken) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            tx,
            runtime,
            token,
        }
    }
}

impl JobScheduler for TimerScheduler {
    fn schedule(&self, info: JobInfo) -> Result<(), ScheduleError> {
        if self.tx.is_closed() || self.token.is_cancelled() {
            return Err(ScheduleError::Unavailable);
        }
        let id = info.id;
        let timing = info.timing;
        info!(
            job = %id,
            periodic = info.is_periodic(),
            constraints = ?info.constraints,
            "registration accepted"
        );
        {
            let mut pending = self
                .pending
                .lock()
                .map_err(|_| ScheduleError::Rejected("scheduler state poisoned".into()))?;
            pending.insert(id, info);
        }

        let tx = self.tx.clone();
        let token = self.token.clone();
        let pending = Arc::clone(&self.pending);
        self.runtime.spawn(async move {
            match timing {
                JobTiming::Periodic { interval_ms } => {
                    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
                    // First tick completes immediately.
                    tick.tick().await;
                    loop {
                        tokio::select! {
                            _ = token.cancelled() => break,
                            _ = tick.tick() => {
                                debug!(job = %id, "periodic activation");
                                if tx.send(JobParams::new(id)).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
                JobTiming::OneShot { min_latency_ms } => {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = tokio::time::sleep(Duration::from_millis(min_latency_ms)) => {
                            if let Ok(mut pending) = pending.lock() {
                                pending.remove(&id);
                            }
                            debug!(job = %id, "one-shot activation");
                            let _ = tx.send(JobParams::new(id));
                        }
                    }
                }
            }
        });
        Ok(())
    }

    fn pending_job(&self, id: JobId) -> Option<JobInfo> {
        self.pending.lock().ok()?.get(&id).cloned()
    }
}
