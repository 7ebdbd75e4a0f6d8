//! Persona set loading.
//!
//! The built-in tutors are used unless `personas_file` points at a TOML file
//! of `[[personas]]` tables, which then replaces them entirely.

use std::path::Path;

use parley_core::persona::builtin::builtin_personas;
use parley_core::persona::registry::PersonaRegistry;
use parley_types::config::ServiceConfig;
use parley_types::error::ConfigError;
use parley_types::persona::{Persona, PersonaFile};

/// Read a persona file.
///
/// # Errors
///
/// Unlike the service config, a persona file that was asked for must load:
/// read and parse failures are returned, as is a file with no personas.
pub async fn load_personas(path: &Path) -> Result<Vec<Persona>, ConfigError> {
    let shown = path.display().to_string();

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: shown.clone(),
            message: e.to_string(),
        })?;

    let file: PersonaFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: shown.clone(),
        message: e.to_string(),
    })?;

    if file.personas.is_empty() {
        return Err(ConfigError::Parse {
            path: shown,
            message: "no [[personas]] entries".to_string(),
        });
    }

    tracing::debug!(path = %shown, count = file.personas.len(), "Loaded persona file");
    Ok(file.personas)
}

/// Build the registry described by `config`.
///
/// # Errors
///
/// Fails if the persona file cannot be loaded, ids collide, or the
/// configured default persona is absent.
pub async fn build_registry(config: &ServiceConfig) -> Result<PersonaRegistry, ConfigError> {
    let personas = match config.personas_file.as_deref() {
        Some(path) => load_personas(Path::new(path)).await?,
        None => builtin_personas(),
    };

    let registry = PersonaRegistry::new(personas, &config.default_persona)?;
    tracing::info!(
        personas = registry.len(),
        default = %registry.default_persona().id,
        "Persona registry ready"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_PERSONAS: &str = r#"
[[personas]]
id = "mia"
name = "Mia"
tagline = "Upbeat"
system_prompt = "You are Mia."

[[personas]]
id = "leo"
name = "Leo"
system_prompt = "You are Leo."
"#;

    async fn write_file(tmp: &TempDir, content: &str) -> String {
        let path = tmp.path().join("personas.toml");
        tokio::fs::write(&path, content).await.unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn build_registry_defaults_to_builtin() {
        let registry = build_registry(&ServiceConfig::default()).await.unwrap();
        assert_eq!(registry.default_persona().id, "sarah");
        assert_eq!(registry.resolve(Some("james")).id, "james");
    }

    #[tokio::test]
    async fn build_registry_from_file() {
        let tmp = TempDir::new().unwrap();
        let mut config = ServiceConfig::default();
        config.personas_file = Some(write_file(&tmp, TWO_PERSONAS).await);
        config.default_persona = "leo".to_string();

        let registry = build_registry(&config).await.unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve(None).id, "leo");
        assert_eq!(registry.resolve(Some("mia")).tagline, "Upbeat");
        // File replaces the built-in set.
        assert_eq!(registry.resolve(Some("sarah")).id, "leo");
    }

    #[tokio::test]
    async fn build_registry_missing_default_fails() {
        let tmp = TempDir::new().unwrap();
        let mut config = ServiceConfig::default();
        config.personas_file = Some(write_file(&tmp, TWO_PERSONAS).await);

        let err = build_registry(&config).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefaultPersona(ref id) if id == "sarah"));
    }

    #[tokio::test]
    async fn load_personas_reads_valid_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, TWO_PERSONAS).await;

        let personas = load_personas(Path::new(&path)).await.unwrap();
        let ids: Vec<&str> = personas.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["mia", "leo"]);
        assert_eq!(personas[1].tagline, "");
    }

    #[tokio::test]
    async fn load_personas_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let err = load_personas(&tmp.path().join("nope.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn load_personas_rejects_bad_or_empty_files() {
        let tmp = TempDir::new().unwrap();
        for content in ["[[personas]]\nid = 3", ""] {
            let path = write_file(&tmp, content).await;
            let err = load_personas(Path::new(&path)).await.unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }), "content: {content:?}");
        }
    }
}
