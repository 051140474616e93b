//! Job lifecycle status and the lightweight polling snapshot.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// Job processing status.
///
/// `Pending` and `Processing` are non-terminal; polling continues while a
/// job is in either. `Completed`, `Failed`, and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is queued waiting for the pipeline
    #[default]
    Pending,
    /// Job is actively being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// The pipeline reported a failure
    Failed,
    /// The pipeline aborted with an error
    Error,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Error => "error",
        }
    }

    /// Check if this is a terminal state (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Error
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lightweight job view for fast polling queries.
///
/// Carries just enough to decide whether to keep polling and what to
/// render, without shipping the full update history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobStatusSnapshot {
    /// Unique job identifier
    pub job_id: JobId,
    /// Current job status
    pub status: JobStatus,
    /// Result URL, present once the job completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    /// Failure reason, present when the job failed or errored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the job reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// When the status was last updated
    pub updated_at: DateTime<Utc>,
}

impl JobStatusSnapshot {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Error.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Processing).unwrap(),
            r#""processing""#
        );
        let status: JobStatus = serde_json::from_str(r#""error""#).unwrap();
        assert_eq!(status, JobStatus::Error);
    }

    #[test]
    fn test_snapshot_omits_empty_fields() {
        let snapshot = JobStatusSnapshot {
            job_id: JobId::from_string("abc123"),
            status: JobStatus::Pending,
            result_url: None,
            error: None,
            completed_at: None,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("result_url"));
        assert!(!json.contains("\"error\""));
    }
}
