//! Service configuration loader for Parley.
//!
//! Reads an optional `parley.toml` and deserializes it into
//! [`ServiceConfig`]. Falls back to defaults when the file is missing or
//! malformed, then applies environment overrides.

use std::path::Path;

use secrecy::SecretString;

use parley_types::config::ServiceConfig;
use parley_types::error::ConfigError;

/// Listener port override.
pub const ENV_PORT: &str = "PORT";
/// Listener host override.
pub const ENV_HOST: &str = "PARLEY_HOST";
/// Model identifier override.
pub const ENV_MODEL: &str = "PARLEY_MODEL";

/// Load service configuration from `path`.
///
/// - `None` or a file that does not exist yields [`ServiceConfig::default()`].
/// - A file that exists but fails to read or parse logs a warning and yields the default.
/// - Otherwise returns the parsed config.
///
/// Environment overrides are applied separately by [`apply_env_overrides`].
pub async fn load_config(path: Option<&Path>) -> ServiceConfig {
    let Some(config_path) = path else {
        tracing::debug!("No config file given, using defaults");
        return ServiceConfig::default();
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Apply `PORT`, `PARLEY_HOST` and `PARLEY_MODEL` from `lookup`.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`. An unparseable `PORT` is
/// ignored with a warning.
pub fn apply_env_overrides<F>(mut config: ServiceConfig, lookup: F) -> ServiceConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(err) => tracing::warn!(value = %port, "Ignoring invalid {ENV_PORT}: {err}"),
        }
    }
    if let Some(host) = lookup(ENV_HOST).filter(|h| !h.is_empty()) {
        config.host = host;
    }
    if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.is_empty()) {
        config.model = model;
    }
    config
}

/// Read the API key from the variable named by `config.api_key_env`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] if the variable is unset or empty.
pub fn resolve_api_key<F>(config: &ServiceConfig, lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&config.api_key_env)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey(config.api_key_env.clone()))
}

/// Lookup backed by the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
