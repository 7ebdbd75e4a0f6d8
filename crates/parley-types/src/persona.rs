//! Persona types.
//!
//! A persona is the behavioral contract (system prompt) the model follows,
//! plus the public profile a client shows when letting the user pick one.

use serde::{Deserialize, Serialize};

/// A named behavioral contract for the tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    /// Display name (e.g., "Sarah").
    pub name: String,
    /// Short label shown on persona cards.
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub system_prompt: String,
}

/// Public view of a persona. The system prompt is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
}

impl From<&Persona> for PersonaProfile {
    fn from(persona: &Persona) -> Self {
        Self {
            id: persona.id.clone(),
            name: persona.name.clone(),
            tagline: persona.tagline.clone(),
            description: persona.description.clone(),
        }
    }
}

/// On-disk persona set (`[[personas]]` tables in a TOML file).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaFile {
    #[serde(default)]
    pub personas: Vec<Persona>,
}
