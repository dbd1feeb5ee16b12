use serde::{Deserialize, Serialize};

use crate::{DurationMs, JobId, ModelError};

/// Device conditions that must hold before the scheduler activates a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConstraints {
    #[serde(default)]
    pub requires_device_idle: bool,
    #[serde(default)]
    pub requires_charging: bool,
    #[serde(default)]
    pub requires_battery_not_low: bool,
    #[serde(default)]
    pub requires_storage_not_low: bool,
}

/// When the scheduler may activate a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum JobTiming {
    /// Activate repeatedly, once per interval.
    #[serde(rename_all = "camelCase")]
    Periodic { interval_ms: DurationMs },
    /// Activate once, no earlier than the given delay.
    #[serde(rename_all = "camelCase")]
    OneShot { min_latency_ms: DurationMs },
}

/// A job registration handed to the trigger scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub id: JobId,
    pub timing: JobTiming,
    #[serde(default)]
    pub constraints: JobConstraints,
}

impl JobInfo {
    /// Periodic registration. A zero interval is rejected.
    pub fn periodic(
        id: JobId,
        interval_ms: DurationMs,
        constraints: JobConstraints,
    ) -> Result<Self, ModelError> {
        if interval_ms == 0 {
            return Err(ModelError::ZeroInterval);
        }
        Ok(Self {
            id,
            timing: JobTiming::Periodic { interval_ms },
            constraints,
        })
    }

    /// One-shot registration with a minimum activation delay.
    pub fn one_shot(id: JobId, min_latency_ms: DurationMs, constraints: JobConstraints) -> Self {
        Self {
            id,
            timing: JobTiming::OneShot { min_latency_ms },
            constraints,
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self.timing, JobTiming::Periodic { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_rejects_zero_interval() {
        let res = JobInfo::periodic(JobId::new(1), 0, JobConstraints::default());
        assert_eq!(res, Err(ModelError::ZeroInterval));
    }

    #[test]
    fn one_shot_allows_zero_latency() {
        let info = JobInfo::one_shot(JobId::new(1), 0, JobConstraints::default());
        assert!(!info.is_periodic());
    }

    #[test]
    fn timing_is_tagged() {
        let info = JobInfo::one_shot(
            JobId::new(9),
            60_000,
            JobConstraints {
                requires_device_idle: true,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["timing"]["type"], "oneShot");
        assert_eq!(json["timing"]["minLatencyMs"], 60_000);
        assert_eq!(json["constraints"]["requiresDeviceIdle"], true);
    }

    #[test]
    fn constraints_default_when_missing() {
        let info: JobInfo = serde_json::from_str(
            r#"{"id":3,"timing":{"type":"periodic","intervalMs":1000}}"#,
        )
        .unwrap();
        assert!(info.is_periodic());
        assert_eq!(info.constraints, JobConstraints::default());
    }
}
