use std::sync::atomic::{AtomicBool, Ordering};

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

static INSTALLED: AtomicBool = AtomicBool::new(false);

pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    if INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(LoggerError::AlreadyInitialized);
    }

    let res = cfg.level.filter().and_then(|filter| match cfg.format {
        LoggerFormat::Text => text(cfg, filter),
        LoggerFormat::Json => json(cfg, filter),
        LoggerFormat::Journald => journald(filter),
    });
    if res.is_err() {
        INSTALLED.store(false, Ordering::SeqCst);
    }
    res
}

fn text(cfg: &LoggerConfig, filter: EnvFilter) -> Result<(), LoggerError> {
    let fmt_layer = fmt::layer()
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets)
        .with_thread_names(true)
        .with_timer(mk_timer());

    init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
}

fn json(cfg: &LoggerConfig, filter: EnvFilter) -> Result<(), LoggerError> {
    let fmt_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_current_span(true)
        .with_timer(mk_timer());

    init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_with<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|e| LoggerError::Install(e.to_string()))
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald(filter: EnvFilter) -> Result<(), LoggerError> {
    let journald = tracing_journald::layer()
        .map_err(|e| LoggerError::Install(format!("journald: {e}")))?;
    init_with(tracing_subscriber::registry().with(filter).with(journald))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald(_filter: EnvFilter) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the subscriber is process-global.
    #[test]
    fn installs_once() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Json,
            use_color: false,
            ..Default::default()
        };
        install(&cfg).unwrap();
        tracing::info!(job = 5132250, "logger installed");

        assert_eq!(install(&cfg), Err(LoggerError::AlreadyInitialized));
    }
}
