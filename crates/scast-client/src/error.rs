//! Job API client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { message: String },

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Rejections and missing jobs are permanent; the poll scheduler uses
    /// this to abandon a chain instead of retrying forever.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::RequestFailed { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
