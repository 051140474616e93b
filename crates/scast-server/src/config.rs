//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Delay between simulated pipeline stages
    pub pipeline_step: Duration,
    /// Optional persona catalog file; the built-in set is used when unset
    pub persona_catalog: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            pipeline_step: Duration::from_millis(1500),
            persona_catalog: None,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SCAST_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SCAST_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("SCAST_CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            pipeline_step: Duration::from_millis(
                std::env::var("SCAST_PIPELINE_STEP_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1500),
            ),
            persona_catalog: std::env::var("SCAST_PERSONA_CATALOG").ok().map(PathBuf::from),
        }
    }
}
