//! In-memory job store.

use std::collections::HashMap;
use std::sync::RwLock;

use scast_models::{Job, JobId, JobStatusSnapshot, JobUpdate};

/// Process-wide job storage.
///
/// Jobs live for the lifetime of the server process. Updates are
/// append-only with per-job monotonic sequence numbers.
#[derive(Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly created job.
    pub fn insert(&self, job: Job) {
        let mut jobs = self.jobs.write().expect("job store lock poisoned");
        jobs.insert(job.job_id.as_str().to_string(), job);
    }

    /// Fetch a job with its full update history.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        let jobs = self.jobs.read().expect("job store lock poisoned");
        jobs.get(id.as_str()).cloned()
    }

    /// Fetch the lightweight status snapshot for a job.
    pub fn snapshot(&self, id: &JobId) -> Option<JobStatusSnapshot> {
        let jobs = self.jobs.read().expect("job store lock poisoned");
        jobs.get(id.as_str()).map(Job::snapshot)
    }

    /// Apply a mutation to a stored job. Returns false if the job is gone.
    pub fn with_job<F: FnOnce(&mut Job)>(&self, id: &JobId, f: F) -> bool {
        let mut jobs = self.jobs.write().expect("job store lock poisoned");
        match jobs.get_mut(id.as_str()) {
            Some(job) => {
                f(job);
                true
            }
            None => false,
        }
    }

    /// Append a stage update to a job.
    pub fn record_update(&self, id: &JobId, stage: &str, message: impl Into<String>) -> bool {
        let message = message.into();
        self.with_job(id, |job| {
            let update = JobUpdate::new(job.next_update_id(), job.job_id.clone(), stage, message);
            job.push_update(update);
        })
    }
}
