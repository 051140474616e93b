//! Stage-progress updates.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// One append-only stage-progress record belonging to a job.
///
/// Updates are produced exclusively by the backend pipeline and consumed
/// read-only by clients. Insertion order is chronological order; `id` is
/// monotonic within a job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobUpdate {
    /// Monotonic sequence number within the job
    pub id: u64,
    /// Owning job
    pub job_id: JobId,
    /// Free-form stage label, e.g. "generating speech"
    pub status: String,
    /// Human-readable progress message
    pub message: String,
    /// When the update was recorded
    pub created_at: DateTime<Utc>,
}

impl JobUpdate {
    /// Create a new update stamped with the current time.
    pub fn new(
        id: u64,
        job_id: JobId,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            job_id,
            status: status.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_creation() {
        let job_id = JobId::new();
        let update = JobUpdate::new(1, job_id.clone(), "generating speech", "Synthesizing audio");

        assert_eq!(update.id, 1);
        assert_eq!(update.job_id, job_id);
        assert_eq!(update.status, "generating speech");
    }
}
