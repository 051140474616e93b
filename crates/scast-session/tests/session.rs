//! Job session store behavior against a mocked backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scast_client::{ApiClient, ClientConfig, ClientError};
use scast_models::{JobId, JobStatus, PersonaId};
use scast_session::{JobSession, SessionConfig};

fn session_for(server: &MockServer, config: SessionConfig) -> Arc<JobSession> {
    let client = ApiClient::new(ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    Arc::new(JobSession::new(Arc::new(client), &config))
}

fn job_body(job_id: &str, status: &str) -> serde_json::Value {
    json!({
        "job_id": job_id,
        "persona_id": "einstein",
        "query": "black holes",
        "status": status,
        "created_at": "2026-08-05T10:00:00Z",
        "updated_at": "2026-08-05T10:00:05Z",
        "updates": [
            {"id": 1, "job_id": job_id, "status": "created",
             "message": "Job created", "created_at": "2026-08-05T10:00:00Z"}
        ]
    })
}

#[tokio::test]
async fn concurrent_fetches_collapse_into_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(job_body("abc123", "processing"))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    let id = JobId::from_string("abc123");

    let (first, second) = tokio::join!(session.fetch_job(&id), session.fetch_job(&id));

    tokio_test::assert_ok!(first);
    tokio_test::assert_ok!(second);
    // expect(1) verifies on drop that only one request went out
}

#[tokio::test]
async fn fetches_within_cooldown_are_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("abc123", "processing")))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    let id = JobId::from_string("abc123");

    let first = session.fetch_job(&id).await.unwrap();
    let second = session.fetch_job(&id).await.unwrap();

    let first_status = first.status.unwrap();
    let second_status = second.status.unwrap();
    assert_eq!(first_status.updated_at, second_status.updated_at);
}

#[tokio::test]
async fn job_and_snapshot_update_atomically() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("abc123", "processing")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("abc123", "completed")))
        .mount(&server)
        .await;

    let session = session_for(
        &server,
        SessionConfig {
            cooldown: Duration::ZERO,
            ..SessionConfig::default()
        },
    );
    let id = JobId::from_string("abc123");

    let view = session.fetch_job(&id).await.unwrap();
    let job = view.job.unwrap();
    let status = view.status.unwrap();
    assert_eq!(job.status, status.status);
    assert_eq!(job.job_id, status.job_id);

    // After the second fetch both fields reflect the newer cycle, never a
    // stale mix.
    let view = session.fetch_job(&id).await.unwrap();
    let job = view.job.unwrap();
    let status = view.status.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(status.status, JobStatus::Completed);
}

#[tokio::test]
async fn clear_job_resets_all_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("abc123", "processing")))
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    session
        .fetch_job(&JobId::from_string("abc123"))
        .await
        .unwrap();

    session.clear_job().await;

    let view = session.view().await;
    assert!(view.job.is_none());
    assert!(view.status.is_none());
    assert!(view.error.is_none());
    assert!(!view.loading);
}

#[tokio::test]
async fn teardown_ignores_in_flight_completion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(job_body("abc123", "completed"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    let id = JobId::from_string("abc123");

    let fetching = {
        let session = Arc::clone(&session);
        let id = id.clone();
        tokio::spawn(async move { session.fetch_job(&id).await })
    };

    // Tear the session down while the response is still on the wire.
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.clear_job().await;

    fetching.await.unwrap().unwrap();

    let view = session.view().await;
    assert!(view.job.is_none());
    assert!(view.status.is_none());
    assert!(view.error.is_none());
}

#[tokio::test]
async fn create_job_stores_the_new_job() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(job_body("abc123", "pending")))
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    let job = session
        .create_job("black holes", &PersonaId::from_string("einstein"))
        .await
        .unwrap();

    assert_eq!(job.job_id.as_str(), "abc123");
    assert_eq!(job.status, JobStatus::Pending);

    let view = session.view().await;
    assert_eq!(view.job.unwrap().job_id.as_str(), "abc123");
    assert!(!view.loading);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn create_job_rejection_is_stored_and_rethrown() {
    let server = MockServer::start().await;

    let session = session_for(&server, SessionConfig::default());
    let err = session
        .create_job("", &PersonaId::from_string("einstein"))
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected { message } => assert_eq!(message, "query is required"),
        other => panic!("expected Rejected, got {other:?}"),
    }

    let view = session.view().await;
    assert!(view.job.is_none());
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("query is required"));
}

#[tokio::test]
async fn switching_jobs_resets_before_the_new_chain() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("first", "processing")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("second", "pending")))
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());

    session.fetch_job(&JobId::from_string("first")).await.unwrap();
    let epoch_before = session.epoch();

    let view = session.fetch_job(&JobId::from_string("second")).await.unwrap();

    assert!(session.epoch() > epoch_before);
    assert_eq!(view.job.unwrap().job_id.as_str(), "second");
    assert_eq!(view.status.unwrap().job_id.as_str(), "second");
}

#[tokio::test]
async fn fetch_failure_records_error_and_rethrows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/abc123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let session = session_for(&server, SessionConfig::default());
    let err = session
        .fetch_job(&JobId::from_string("abc123"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());

    let view = session.view().await;
    assert!(view.error.is_some());
    assert!(view.job.is_none());
}
