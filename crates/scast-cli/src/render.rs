//! View rendering for the terminal.
//!
//! A pure function of the session's view: one of loading, error,
//! terminal-failure, terminal-completed, or in-progress, plus the
//! chronological stage-update list. Never blank.

use scast_models::{Job, JobStatus};
use scast_session::JobView;

/// Render the headline line for the current view.
pub fn render_view(view: &JobView) -> String {
    if let Some(error) = &view.error {
        return format!("Request failed: {error}");
    }

    if view.loading && view.job.is_none() {
        return "Submitting job...".to_string();
    }

    if let Some(status) = &view.status {
        return match status.status {
            JobStatus::Completed => format!(
                "Video ready: {}",
                status.result_url.as_deref().unwrap_or("(no result URL)")
            ),
            JobStatus::Failed | JobStatus::Error => format!(
                "Generation failed: {}",
                status.error.as_deref().unwrap_or("unknown error")
            ),
            JobStatus::Pending => "Waiting for the pipeline...".to_string(),
            JobStatus::Processing => "Generating...".to_string(),
        };
    }

    match &view.job {
        Some(job) => format!("Job {} submitted, waiting for updates...", job.job_id),
        None => "No job in session.".to_string(),
    }
}

/// Render one stage update as a list row.
pub fn render_update(update: &scast_models::JobUpdate) -> String {
    format!(
        "  [{}] {} - {}",
        update.created_at.format("%H:%M:%S"),
        update.status,
        update.message
    )
}

/// Print stage updates past the already-printed count, returning the new count.
pub fn print_new_updates(job: Option<&Job>, already_printed: usize) -> usize {
    let Some(job) = job else {
        return already_printed;
    };

    for update in job.updates.iter().skip(already_printed) {
        println!("{}", render_update(update));
    }
    job.updates.len().max(already_printed)
}
