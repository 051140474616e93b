//! HTTP contract tests for the job API client.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scast_client::{ApiClient, ClientConfig, ClientError};
use scast_models::{CreateJobRequest, Job, JobId, JobStatus, PersonaId};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn personas_are_mapped_from_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/personas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "einstein", "name": "Albert Einstein", "icon_url": "https://cdn/e.png"},
            {"id": "curie", "name": "Marie Curie", "icon_url": "https://cdn/c.png"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let personas = client_for(&server).list_personas().await.unwrap();

    assert_eq!(personas.len(), 2);
    assert_eq!(personas[0].id.as_str(), "einstein");
    assert_eq!(personas[0].image_url, "https://cdn/e.png");
}

#[tokio::test]
async fn create_job_posts_query_and_persona() {
    let server = MockServer::start().await;

    let mut job = Job::new(PersonaId::from_string("einstein"), "black holes");
    job.job_id = JobId::from_string("abc123");

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .and(body_json(json!({"query": "black holes", "persona": "einstein"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::to_value(&job).unwrap()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_job(&CreateJobRequest::new("black holes", "einstein"))
        .await
        .unwrap();

    assert_eq!(created.job_id.as_str(), "abc123");
    assert_eq!(created.status, JobStatus::Pending);
}

#[tokio::test]
async fn create_job_rejects_empty_query_without_network_call() {
    // No mocks mounted: a request reaching the server would 404.
    let server = MockServer::start().await;

    let err = client_for(&server)
        .create_job(&CreateJobRequest::new("", "einstein"))
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected { message } => assert_eq!(message, "query is required"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn create_job_surfaces_backend_rejection_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "unknown persona: elvis"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_job(&CreateJobRequest::new("black holes", "elvis"))
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected { message } => assert_eq!(message, "unknown persona: elvis"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_job_is_a_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/nope/status"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "job not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .job_status(&JobId::from_string("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotFound(ref id) if id == "nope"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .job_detail(&JobId::from_string("abc123"))
        .await
        .unwrap_err();

    match &err {
        ClientError::RequestFailed { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn job_detail_includes_updates_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "persona_id": "einstein",
            "query": "black holes",
            "status": "processing",
            "created_at": "2026-08-05T10:00:00Z",
            "updated_at": "2026-08-05T10:00:12Z",
            "updates": [
                {"id": 1, "job_id": "abc123", "status": "created",
                 "message": "Job created", "created_at": "2026-08-05T10:00:00Z"},
                {"id": 2, "job_id": "abc123", "status": "generating speech",
                 "message": "Synthesizing audio", "created_at": "2026-08-05T10:00:12Z"}
            ]
        })))
        .mount(&server)
        .await;

    let job = client_for(&server)
        .job_detail(&JobId::from_string("abc123"))
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Processing);
    assert_eq!(job.updates.len(), 2);
    assert!(job.updates[0].id < job.updates[1].id);
    assert_eq!(job.updates[1].status, "generating speech");
}
