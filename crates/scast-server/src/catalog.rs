//! Persona catalog.
//!
//! File-backed when configured, with a built-in development set otherwise.
//! Extra fields in the catalog file are ignored; only id, name, and icon
//! URL are served.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use scast_models::{Persona, PersonaId, PersonaRecord};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read persona catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed persona catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog file shape: `{"personas": [{"id", "name", "icon_url", ...}]}`.
#[derive(Deserialize)]
struct CatalogFile {
    personas: Vec<PersonaRecord>,
}

/// The set of personas the pipeline can impersonate.
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Built-in development set.
    pub fn builtin() -> Self {
        let records = [
            ("einstein", "Albert Einstein", "https://cdn.starcast.dev/personas/einstein.png"),
            ("curie", "Marie Curie", "https://cdn.starcast.dev/personas/curie.png"),
            ("attenborough", "David Attenborough", "https://cdn.starcast.dev/personas/attenborough.png"),
            ("tyson", "Neil deGrasse Tyson", "https://cdn.starcast.dev/personas/tyson.png"),
        ];

        Self {
            personas: records
                .into_iter()
                .map(|(id, name, icon_url)| Persona {
                    id: PersonaId::from_string(id),
                    name: name.to_string(),
                    image_url: icon_url.to_string(),
                })
                .collect(),
        }
    }

    /// Load the catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;

        info!(
            "Loaded {} personas from {}",
            file.personas.len(),
            path.display()
        );

        Ok(Self {
            personas: file.personas.into_iter().map(Persona::from).collect(),
        })
    }

    /// Number of personas in the catalog.
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Look up a persona by id.
    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id.as_str() == id)
    }

    /// Whether the catalog contains the given persona id.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Catalog in its wire shape.
    pub fn records(&self) -> Vec<PersonaRecord> {
        self.personas.iter().cloned().map(PersonaRecord::from).collect()
    }
}
