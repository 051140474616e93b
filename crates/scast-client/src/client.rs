//! Job API HTTP client.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;
use validator::Validate;

use scast_models::{CreateJobRequest, Job, JobId, JobStatusSnapshot, Persona, PersonaRecord};

use crate::error::{ClientError, ClientResult};

/// Configuration for the job API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the job API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SCAST_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("SCAST_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Structured error body returned by the backend on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin typed wrapper over the job API endpoints.
///
/// Carries no retry or caching logic; failures always surface as a
/// [`ClientError`]. Retrying is the poll scheduler's responsibility.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client, validating the configured base URL.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let parsed: Url = config.base_url.parse()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Fetch the persona catalog.
    pub async fn list_personas(&self) -> ClientResult<Vec<Persona>> {
        let url = format!("{}/api/personas", self.base_url);
        debug!("Fetching persona catalog from {}", url);

        let response = self.http.get(&url).send().await?;
        let records: Vec<PersonaRecord> = Self::read_json(response, None).await?;

        Ok(records.into_iter().map(Persona::from).collect())
    }

    /// Submit a generation request.
    ///
    /// The query and persona are checked for non-emptiness locally; any
    /// deeper validation is the backend's, surfaced verbatim as
    /// [`ClientError::Rejected`].
    pub async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<Job> {
        if let Err(e) = request.validate() {
            return Err(ClientError::Rejected {
                message: flatten_validation_errors(&e),
            });
        }

        let url = format!("{}/api/jobs", self.base_url);
        debug!(persona = %request.persona, "Submitting generation request to {}", url);

        let response = self.http.post(&url).json(request).send().await?;
        Self::read_json(response, None).await
    }

    /// Fetch the lightweight status snapshot for a job.
    pub async fn job_status(&self, job_id: &JobId) -> ClientResult<JobStatusSnapshot> {
        let url = format!("{}/api/jobs/{}/status", self.base_url, job_id);
        let response = self.http.get(&url).send().await?;
        Self::read_json(response, Some(job_id)).await
    }

    /// Fetch the full job record including its stage updates.
    pub async fn job_detail(&self, job_id: &JobId) -> ClientResult<Job> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        let response = self.http.get(&url).send().await?;
        Self::read_json(response, Some(job_id)).await
    }

    /// Decode a successful response, or map the failure status.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: Response,
        job_id: Option<&JobId>,
    ) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = job_id {
                return Err(ClientError::NotFound(id.to_string()));
            }
        }

        let body = response.text().await.unwrap_or_default();

        if status.is_client_error() {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(ClientError::Rejected {
                    message: parsed.error,
                });
            }
        }

        Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body,
        })
    }
}

fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_malformed_base_url() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            ApiClient::new(config),
            Err(ClientError::BaseUrl(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig {
            base_url: "http://localhost:8000/".into(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
