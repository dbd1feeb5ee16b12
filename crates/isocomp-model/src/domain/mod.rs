mod job_id;
pub use job_id::JobId;

mod job_params;
pub use job_params::JobParams;

mod outcome;
pub use outcome::Outcome;

mod job_info;
pub use job_info::{JobConstraints, JobInfo, JobTiming};

/// Scheduler id of the periodic (daily) compilation job.
pub const DAILY_JOB_ID: JobId = JobId::new(5132250);

/// Scheduler id of the one-shot job queued after APEXes are staged.
pub const STAGED_APEX_JOB_ID: JobId = JobId::new(5132251);

/// Duration value in milliseconds.
pub type DurationMs = u64;
