//! Timer-driven poll scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use scast_client::ClientError;
use scast_models::{JobId, JobStatus};

use crate::session::{JobSession, SessionConfig};

/// Outcome of one polling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Job is still in a non-terminal state; schedule another fetch
    Continue,
    /// Job reached a terminal status; no further fetch is scheduled
    Done(JobStatus),
    /// The chain was abandoned: session reset, or the job does not exist
    Abandoned,
}

/// Keeps a non-terminal job fresh without the caller managing timers.
///
/// State machine per viewed job: an immediate fetch on start, then exactly
/// one sleep between fetches until the status turns terminal, the session
/// is reset, or the handle is dropped. A transient fetch failure never
/// stops the chain; it only delays the next successful update.
pub struct JobPoller {
    session: Arc<JobSession>,
    job_id: JobId,
    interval: Duration,
    epoch: u64,
}

impl JobPoller {
    /// Create a poller bound to the session's current epoch.
    ///
    /// Resetting the session after this point abandons the chain.
    pub fn new(session: Arc<JobSession>, job_id: JobId, config: &SessionConfig) -> Self {
        let epoch = session.epoch();
        Self {
            session,
            job_id,
            interval: config.poll_interval,
            epoch,
        }
    }

    /// Perform one fetch and classify the result.
    pub async fn poll_once(&self) -> PollStep {
        if self.session.epoch() != self.epoch {
            debug!(job_id = %self.job_id, "Session moved on, abandoning poll chain");
            return PollStep::Abandoned;
        }

        match self.session.fetch_job(&self.job_id).await {
            Ok(view) => {
                if self.session.epoch() != self.epoch {
                    return PollStep::Abandoned;
                }
                match view.status {
                    Some(snapshot) if snapshot.is_terminal() => {
                        info!(
                            job_id = %self.job_id,
                            status = %snapshot.status,
                            "Job reached terminal status, polling stops"
                        );
                        PollStep::Done(snapshot.status)
                    }
                    _ => PollStep::Continue,
                }
            }
            Err(ClientError::NotFound(_)) => {
                warn!(job_id = %self.job_id, "Job not found, abandoning poll chain");
                PollStep::Abandoned
            }
            Err(e) => {
                // Transient blip: the next scheduled fetch retries.
                warn!(job_id = %self.job_id, "Poll fetch failed: {}", e);
                PollStep::Continue
            }
        }
    }

    /// Drive the chain to its end: immediate fetch, then one timer per
    /// follow-up fetch until the step is no longer [`PollStep::Continue`].
    pub async fn run(&self) -> PollStep {
        loop {
            match self.poll_once().await {
                PollStep::Continue => tokio::time::sleep(self.interval).await,
                step => return step,
            }
        }
    }

    /// Run the chain on a background task.
    pub fn spawn(self) -> PollHandle {
        let job_id = self.job_id.clone();
        let task = tokio::spawn(async move { self.run().await });
        PollHandle { job_id, task }
    }
}

/// Handle to a spawned poll chain. Dropping it cancels the chain.
pub struct PollHandle {
    job_id: JobId,
    task: JoinHandle<PollStep>,
}

impl PollHandle {
    /// Id of the job being polled.
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Cancel the chain, including any pending timer.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the chain has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the chain to end and return its final step.
    pub async fn join(mut self) -> Option<PollStep> {
        (&mut self.task).await.ok()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
