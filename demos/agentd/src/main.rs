mod composd;
mod scheduler;
mod sink;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use isocomp_core::{
    JobConfig, JobCoordinator, is_staged_apex_job_scheduled, schedule_daily_job,
    schedule_staged_apex_job,
};
use isocomp_model::{JobId, JobParams};
use isocomp_observe::{LoggerConfig, LoggerFormat, LoggerLevel, init_logger};
use tokio::sync::mpsc::unbounded_channel;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{composd::SimulatedComposd, scheduler::TimerScheduler, sink::LoggingSink};

/// Reads `JobConfig` from the JSON file named by `ISOCOMP_CONFIG`, or uses short demo timings.
fn load_config() -> anyhow::Result<JobConfig> {
    match std::env::var("ISOCOMP_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parse {path}"))
        }
        Err(_) => Ok(JobConfig {
            daily_interval_ms: 20_000,
            staged_apex_min_latency_ms: 5_000,
            ..Default::default()
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let level = std::env::var("ISOCOMP_LOG").unwrap_or_else(|_| "info".to_string());
    let format = match std::env::var("ISOCOMP_LOG_FORMAT") {
        Ok(raw) => raw.parse::<LoggerFormat>()?,
        Err(_) => LoggerFormat::default(),
    };
    let cfg = LoggerConfig {
        format,
        level: LoggerLevel::new(level)?,
        ..Default::default()
    };
    init_logger(&cfg)?;
    info!(%format, "logger initialized");

    // 2) Coordinator
    let config = load_config()?;
    let composd = SimulatedComposd::new(config.service_name.clone(), Duration::from_secs(3));
    let coordinator = JobCoordinator::builder(composd, Arc::new(LoggingSink))
        .with_config(config.clone())
        .build()?;
    info!(service = %config.service_name, "coordinator ready");

    // 3) Scheduler
    let token = CancellationToken::new();
    let (tx, mut activations) = unbounded_channel();
    let scheduler = TimerScheduler::new(tx, tokio::runtime::Handle::current(), token.clone());
    schedule_daily_job(&scheduler, &config)?;
    if !is_staged_apex_job_scheduled(&scheduler) {
        schedule_staged_apex_job(&scheduler, &config)?;
    }

    // 4) Optional immediate activation, e.g. ISOCOMP_TRIGGER=5132251
    if let Ok(raw) = std::env::var("ISOCOMP_TRIGGER") {
        let id: JobId = raw.parse()?;
        if !coordinator.on_start(JobParams::from(id)) {
            warn!(job = %id, "immediate activation dropped");
        }
    }

    // 5) Run until Ctrl+C
    info!("press Ctrl+C to stop");
    loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                break;
            }
            Some(params) = activations.recv() => {
                if !coordinator.on_start(params) {
                    warn!(job = %params.job_id, "activation dropped, a job is already running");
                }
            }
        }
    }

    info!("shutting down...");
    token.cancel();
    if coordinator.on_stop() {
        info!("running job interrupted");
    }
    Ok(())
}
