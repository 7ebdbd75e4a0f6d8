//! Persona registry.
//!
//! Built once at startup and shared read-only for the life of the process.
//! Lookup never fails: unknown or missing ids resolve to the default persona.

use std::collections::HashMap;

use parley_types::error::ConfigError;
use parley_types::persona::{Persona, PersonaProfile};

use super::builtin::{DEFAULT_PERSONA_ID, builtin_personas};

/// Immutable id-indexed set of personas with a designated default.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    /// Personas in the order they were configured.
    personas: Vec<Persona>,
    index: HashMap<String, usize>,
    default_index: usize,
}

impl PersonaRegistry {
    /// Build a registry from a persona list.
    ///
    /// # Errors
    ///
    /// Fails if two personas share an id or if `default_id` is not among them.
    pub fn new(personas: Vec<Persona>, default_id: &str) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(personas.len());
        for (i, persona) in personas.iter().enumerate() {
            if index.insert(persona.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicatePersona(persona.id.clone()));
            }
        }

        let default_index = *index
            .get(default_id)
            .ok_or_else(|| ConfigError::MissingDefaultPersona(default_id.to_string()))?;

        Ok(Self {
            personas,
            index,
            default_index,
        })
    }

    /// The built-in persona set with its standard default.
    ///
    /// # Errors
    ///
    /// Same as [`PersonaRegistry::new`]; the built-in set always passes.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(builtin_personas(), DEFAULT_PERSONA_ID)
    }

    /// Resolve a persona id, falling back to the default for `None`, empty
    /// or unknown ids.
    pub fn resolve(&self, id: Option<&str>) -> &Persona {
        match id.and_then(|id| self.index.get(id)) {
            Some(&i) => &self.personas[i],
            None => {
                if let Some(requested) = id.filter(|id| !id.is_empty()) {
                    tracing::debug!(requested, "Unknown persona, using default");
                }
                self.default_persona()
            }
        }
    }

    pub fn default_persona(&self) -> &Persona {
        &self.personas[self.default_index]
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Public profiles in configured order.
    pub fn profiles(&self) -> Vec<PersonaProfile> {
        self.personas.iter().map(PersonaProfile::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(id: &str) -> Persona {
        Persona {
            id: id.to_string(),
            name: id.to_uppercase(),
            tagline: String::new(),
            description: String::new(),
            system_prompt: format!("You are {id}."),
        }
    }

    #[test]
    fn test_resolve_known_id() {
        let registry = PersonaRegistry::builtin().unwrap();
        assert_eq!(registry.resolve(Some("james")).id, "james");
        assert_eq!(registry.resolve(Some("sarah")).id, "sarah");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = PersonaRegistry::builtin().unwrap();
        assert_eq!(registry.resolve(None).id, DEFAULT_PERSONA_ID);
        assert_eq!(registry.resolve(Some("")).id, DEFAULT_PERSONA_ID);
        assert_eq!(registry.resolve(Some("nobody")).id, DEFAULT_PERSONA_ID);
        // Ids are case-sensitive
        assert_eq!(registry.resolve(Some("JAMES")).id, DEFAULT_PERSONA_ID);
    }

    #[test]
    fn test_custom_default() {
        let registry = PersonaRegistry::new(vec![persona("a"), persona("b")], "b").unwrap();
        assert_eq!(registry.resolve(Some("zzz")).id, "b");
        assert_eq!(registry.default_persona().id, "b");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_missing_default_rejected() {
        let err = PersonaRegistry::new(vec![persona("a")], "b").unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefaultPersona(id) if id == "b"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = PersonaRegistry::new(vec![persona("a"), persona("a")], "a").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePersona(id) if id == "a"));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(PersonaRegistry::new(Vec::new(), "sarah").is_err());
    }

    #[test]
    fn test_profiles_keep_order() {
        let registry = PersonaRegistry::new(vec![persona("z"), persona("a")], "a").unwrap();
        let ids: Vec<String> = registry.profiles().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_builtin_set_passes_validation() {
        let registry = PersonaRegistry::new(builtin_personas(), DEFAULT_PERSONA_ID).unwrap();
        assert_eq!(registry.default_persona().id, DEFAULT_PERSONA_ID);
        assert_eq!(registry.len(), builtin_personas().len());

        let builtin = PersonaRegistry::builtin().unwrap();
        assert_eq!(builtin.profiles(), registry.profiles());
    }
}
