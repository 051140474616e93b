//! Simulated generation pipeline.
//!
//! Walks a job through the same stages the production pipeline records
//! (script, speech, persona footage, visuals, final assembly) with a
//! configurable delay per stage. Real vendor integrations are out of
//! scope; this exists so the polling side has a live backend to talk to.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use scast_models::{Job, JobId};

use crate::catalog::PersonaCatalog;
use crate::store::JobStore;

/// Stage labels recorded as job updates.
pub mod stage {
    pub const CREATED: &str = "created";
    pub const GENERATING_SCRIPT: &str = "generating script";
    pub const GENERATING_SPEECH: &str = "generating speech";
    pub const RENDERING_PERSONA: &str = "rendering persona video";
    pub const COMPOSING_VISUALS: &str = "composing visuals";
    pub const ASSEMBLING_VIDEO: &str = "assembling video";
    pub const COMPLETED: &str = "completed";
    pub const ERROR: &str = "error";
}

/// Driver for the simulated pipeline.
pub struct Pipeline {
    store: Arc<JobStore>,
    catalog: Arc<PersonaCatalog>,
    step_delay: Duration,
}

impl Pipeline {
    pub fn new(store: Arc<JobStore>, catalog: Arc<PersonaCatalog>, step_delay: Duration) -> Self {
        Self {
            store,
            catalog,
            step_delay,
        }
    }

    /// Record the job and kick off background processing.
    pub fn submit(self: &Arc<Self>, job: Job) {
        let job_id = job.job_id.clone();
        self.store.insert(job);
        self.store.record_update(
            &job_id,
            stage::CREATED,
            "Job created, waiting for the pipeline",
        );

        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline.process(job_id).await;
        });
    }

    async fn process(&self, job_id: JobId) {
        let Some(job) = self.store.get(&job_id) else {
            warn!(%job_id, "Job vanished before processing started");
            return;
        };

        info!(%job_id, persona = %job.persona_id, "Processing job");

        tokio::time::sleep(self.step_delay).await;

        // The script stage needs a known persona; an unknown id fails the
        // job the way a failed vendor call would.
        let Some(persona) = self.catalog.get(job.persona_id.as_str()).cloned() else {
            self.fail(&job_id, format!("unknown persona: {}", job.persona_id));
            return;
        };

        self.store.with_job(&job_id, |job| job.start());

        let stages = [
            (
                stage::GENERATING_SCRIPT,
                format!("Writing {} script about {}", persona.name, job.query),
            ),
            (
                stage::GENERATING_SPEECH,
                "Synthesizing narration audio".to_string(),
            ),
            (
                stage::RENDERING_PERSONA,
                format!("Rendering lip-synced {} footage", persona.name),
            ),
            (
                stage::COMPOSING_VISUALS,
                "Composing explanatory visuals".to_string(),
            ),
            (
                stage::ASSEMBLING_VIDEO,
                "Assembling the final video".to_string(),
            ),
        ];

        for (label, message) in stages {
            if !self.store.record_update(&job_id, label, message) {
                warn!(%job_id, "Job vanished mid-pipeline");
                return;
            }
            tokio::time::sleep(self.step_delay).await;
        }

        let result_url = format!("/api/jobs/{}/video", job_id);
        self.store.with_job(&job_id, |job| job.complete(&result_url));
        self.store
            .record_update(&job_id, stage::COMPLETED, "Video ready");

        info!(%job_id, "Job completed");
    }

    fn fail(&self, job_id: &JobId, reason: String) {
        warn!(%job_id, "Job failed: {}", reason);
        self.store.with_job(job_id, |job| job.fail(&reason));
        self.store
            .record_update(job_id, stage::ERROR, format!("Processing error: {reason}"));
    }
}
