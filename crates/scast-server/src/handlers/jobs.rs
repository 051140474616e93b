//! Job creation and polling handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use validator::Validate;

use scast_models::{CreateJobRequest, Job, JobId, JobStatusSnapshot, PersonaId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Create a generation job and start the pipeline.
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let Json(request) = payload
        .map_err(|_| ApiError::bad_request("Missing required fields: query and persona"))?;

    if let Err(errors) = request.validate() {
        return Err(ApiError::bad_request(validation_message(&errors)));
    }

    let job = Job::new(
        PersonaId::from_string(&request.persona),
        request.query.as_str(),
    );
    let job_id = job.job_id.clone();

    info!(%job_id, persona = %request.persona, "Creating job");
    state.pipeline.submit(job);

    // Serve the stored record so the initial update is included.
    let stored = state
        .store
        .get(&job_id)
        .ok_or_else(|| ApiError::internal("job disappeared during creation"))?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Fetch a job with its full update history.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::from_string(job_id);
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("job not found"))
}

/// Fetch the lightweight status snapshot for a job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobStatusSnapshot>> {
    let id = JobId::from_string(job_id);
    state
        .store
        .snapshot(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("job not found"))
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    messages.sort();

    if messages.is_empty() {
        "invalid request".to_string()
    } else {
        messages.join(", ")
    }
}
