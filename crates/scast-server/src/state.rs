//! Application state.

use std::sync::Arc;

use crate::catalog::{CatalogError, PersonaCatalog};
use crate::config::ServerConfig;
use crate::pipeline::Pipeline;
use crate::store::JobStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<JobStore>,
    pub catalog: Arc<PersonaCatalog>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ServerConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.persona_catalog {
            Some(path) => PersonaCatalog::from_file(path)?,
            None => PersonaCatalog::builtin(),
        };

        let store = Arc::new(JobStore::new());
        let catalog = Arc::new(catalog);
        let pipeline = Arc::new(Pipeline::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            config.pipeline_step,
        ));

        Ok(Self {
            config,
            store,
            catalog,
            pipeline,
        })
    }
}
