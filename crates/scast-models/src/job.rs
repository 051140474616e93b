//! Job lifecycle record.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::persona::PersonaId;
use crate::status::{JobStatus, JobStatusSnapshot};
use crate::update::JobUpdate;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end-to-end generation request and its lifecycle record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID, assigned at creation
    pub job_id: JobId,

    /// Selected persona, immutable after creation
    pub persona_id: PersonaId,

    /// Topic text supplied at creation, immutable after creation
    pub query: String,

    /// Current lifecycle status
    #[serde(default)]
    pub status: JobStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// When the job reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Result URL (present only when completed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,

    /// Failure reason (present only when failed or errored)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Stage updates in chronological order
    #[serde(default)]
    pub updates: Vec<JobUpdate>,
}

impl Job {
    /// Create a new pending job.
    pub fn new(persona_id: PersonaId, query: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            job_id: JobId::new(),
            persona_id,
            query: query.into(),
            status: JobStatus::Pending,
            created_at: now,
            completed_at: None,
            result_url: None,
            error: None,
            updated_at: now,
            updates: Vec::new(),
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move the job into processing.
    pub fn start(&mut self) {
        self.status = JobStatus::Processing;
        self.updated_at = Utc::now();
    }

    /// Mark the job as completed with its result URL.
    pub fn complete(&mut self, result_url: impl Into<String>) {
        self.status = JobStatus::Completed;
        self.result_url = Some(result_url.into());
        self.completed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Mark the job as failed with an error message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Error;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Append a stage update, keeping chronological order.
    pub fn push_update(&mut self, update: JobUpdate) {
        self.updated_at = update.created_at;
        self.updates.push(update);
    }

    /// Next monotonic update sequence number for this job.
    pub fn next_update_id(&self) -> u64 {
        self.updates.last().map(|u| u.id + 1).unwrap_or(1)
    }

    /// Derive the lightweight polling snapshot from this record.
    pub fn snapshot(&self) -> JobStatusSnapshot {
        JobStatusSnapshot {
            job_id: self.job_id.clone(),
            status: self.status,
            result_url: self.result_url.clone(),
            error: self.error.clone(),
            completed_at: self.completed_at,
            updated_at: self.updated_at,
        }
    }
}
