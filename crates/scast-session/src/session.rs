//! Session-scoped job state store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use scast_client::{ApiClient, ClientResult};
use scast_models::{CreateJobRequest, Job, JobId, JobStatusSnapshot, PersonaId};

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Window after a completed fetch during which repeat fetches for the
    /// same job are served from the cache.
    pub cooldown: Duration,
    /// Delay between scheduled polls.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(3),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            cooldown: Duration::from_secs(
                std::env::var("SCAST_FETCH_COOLDOWN_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3),
            ),
            poll_interval: Duration::from_secs(
                std::env::var("SCAST_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Owned snapshot of the session state, handed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct JobView {
    /// The job the session currently tracks
    pub job: Option<Job>,
    /// Latest status snapshot, always from the same fetch cycle as `job`
    pub status: Option<JobStatusSnapshot>,
    /// A create or fetch operation is in progress
    pub loading: bool,
    /// Message from the most recent failed operation
    pub error: Option<String>,
}

#[derive(Default)]
struct Inner {
    view: JobView,
    /// Job id with a fetch currently outstanding
    in_flight: Option<JobId>,
    /// Id and completion time of the last successful fetch
    last_fetch: Option<(JobId, Instant)>,
}

impl Inner {
    fn tracks_other_job(&self, job_id: &JobId) -> bool {
        self.in_flight.as_ref().is_some_and(|id| id != job_id)
            || self.view.job.as_ref().is_some_and(|j| &j.job_id != job_id)
            || self
                .view
                .status
                .as_ref()
                .is_some_and(|s| &s.job_id != job_id)
    }
}

/// Single authoritative snapshot of the job the user is currently viewing.
///
/// All mutation goes through this type's operations. The `epoch` counter is
/// the cancellation token: it advances on every reset, and any in-flight
/// completion re-checks it before touching state, so completions landing
/// after teardown or after a switch to a different job are dropped.
pub struct JobSession {
    client: Arc<ApiClient>,
    cooldown: Duration,
    epoch: AtomicU64,
    inner: Mutex<Inner>,
}

impl JobSession {
    /// Create a new session backed by the given API client.
    pub fn new(client: Arc<ApiClient>, config: &SessionConfig) -> Self {
        Self {
            client,
            cooldown: config.cooldown,
            epoch: AtomicU64::new(0),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Current cancellation epoch. Advances on every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Owned copy of the current state for rendering.
    pub async fn view(&self) -> JobView {
        self.inner.lock().await.view.clone()
    }

    /// Submit a new generation request and track it.
    ///
    /// Clears any prior job state first. On failure the message lands in the
    /// view's `error` field and the error is rethrown so the caller can
    /// react without duplicating fetch logic.
    pub async fn create_job(&self, query: &str, persona_id: &PersonaId) -> ClientResult<Job> {
        let epoch = {
            let mut inner = self.inner.lock().await;
            self.reset_locked(&mut inner);
            inner.view.loading = true;
            self.epoch()
        };

        let request = CreateJobRequest::new(query, persona_id.as_str());
        let result = self.client.create_job(&request).await;

        let mut inner = self.inner.lock().await;
        if self.epoch() != epoch {
            return result;
        }

        inner.view.loading = false;
        match result {
            Ok(job) => {
                debug!(job_id = %job.job_id, "Created job");
                inner.view.job = Some(job.clone());
                Ok(job)
            }
            Err(e) => {
                inner.view.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Refresh `job` and `status` for the given id.
    ///
    /// At most one fetch per id is in flight at any instant: a call arriving
    /// while one is outstanding, or within the cool-down window of the last
    /// completed fetch, returns the cached view without a network request.
    /// Both fields are replaced together from the same response.
    pub async fn fetch_job(&self, job_id: &JobId) -> ClientResult<JobView> {
        let epoch = {
            let mut inner = self.inner.lock().await;

            if inner.in_flight.as_ref() == Some(job_id) {
                debug!(%job_id, "Fetch already in flight, serving cached view");
                return Ok(inner.view.clone());
            }

            if let Some((id, at)) = &inner.last_fetch {
                if id == job_id && at.elapsed() < self.cooldown {
                    debug!(%job_id, "Within fetch cool-down, serving cached view");
                    return Ok(inner.view.clone());
                }
            }

            // Switching to a different job: drop the old state before the
            // new chain starts so nothing bleeds across ids.
            if inner.tracks_other_job(job_id) {
                self.reset_locked(&mut inner);
            }

            inner.in_flight = Some(job_id.clone());
            self.epoch()
        };

        let result = self.client.job_detail(job_id).await;

        let mut inner = self.inner.lock().await;
        if self.epoch() != epoch {
            debug!(%job_id, "Session reset while fetch was out, dropping result");
            return Ok(inner.view.clone());
        }

        inner.in_flight = None;
        match result {
            Ok(job) => {
                inner.view.error = None;
                inner.view.status = Some(job.snapshot());
                inner.view.job = Some(job);
                inner.last_fetch = Some((job_id.clone(), Instant::now()));
                Ok(inner.view.clone())
            }
            Err(e) => {
                inner.view.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reset the session to its empty state.
    ///
    /// Used on reset-to-home and before switching to a different job id.
    pub async fn clear_job(&self) {
        let mut inner = self.inner.lock().await;
        self.reset_locked(&mut inner);
    }

    fn reset_locked(&self, inner: &mut Inner) {
        inner.view = JobView::default();
        inner.in_flight = None;
        inner.last_fetch = None;
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}
