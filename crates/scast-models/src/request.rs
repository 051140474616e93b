//! Job creation request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for creating a generation job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateJobRequest {
    /// Topic to explain
    #[validate(length(min = 1, message = "query is required"))]
    pub query: String,

    /// Selected persona ID
    #[validate(length(min = 1, message = "persona is required"))]
    pub persona: String,
}

impl CreateJobRequest {
    pub fn new(query: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            persona: persona.into(),
        }
    }
}
