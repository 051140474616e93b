//! Persona reference data.
//!
//! Personas are owned by the catalog service; clients treat them as
//! read-only reference data with no lifecycle beyond the fetch that
//! populates a selection list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a persona.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PersonaId(pub String);

impl PersonaId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable persona.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Persona {
    /// Stable persona ID
    pub id: PersonaId,
    /// Display name
    pub name: String,
    /// Portrait image URL
    pub image_url: String,
}

/// Persona as serialized by the catalog endpoint.
///
/// The wire shape uses `icon_url`; [`Persona`] is the client-facing shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PersonaRecord {
    pub id: String,
    pub name: String,
    pub icon_url: String,
}

impl From<PersonaRecord> for Persona {
    fn from(record: PersonaRecord) -> Self {
        Self {
            id: PersonaId(record.id),
            name: record.name,
            image_url: record.icon_url,
        }
    }
}

impl From<Persona> for PersonaRecord {
    fn from(persona: Persona) -> Self {
        Self {
            id: persona.id.0,
            name: persona.name,
            icon_url: persona.image_url,
        }
    }
}
