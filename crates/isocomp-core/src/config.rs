use isocomp_model::DurationMs;
use serde::Deserialize;

/// Name under which the compilation service registers itself.
pub const COMPOSD_SERVICE_NAME: &str = "android.system.composd";

const ONE_DAY_MS: DurationMs = 24 * 60 * 60 * 1000;
const SIXTY_MINUTES_MS: DurationMs = 60 * 60 * 1000;

/// Coordinator and scheduling configuration.
///
/// Every field has a default, so hosts may deserialize a partial document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobConfig {
    /// Service looked up by the starter before every job.
    pub service_name: String,
    /// Interval of the periodic compilation job.
    pub daily_interval_ms: DurationMs,
    /// Minimum delay before the staged APEX job may run, leaving room for more staging.
    pub staged_apex_min_latency_ms: DurationMs,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            service_name: COMPOSD_SERVICE_NAME.to_string(),
            daily_interval_ms: ONE_DAY_MS,
            staged_apex_min_latency_ms: SIXTY_MINUTES_MS,
        }
    }
}
