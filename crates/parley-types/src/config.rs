//! Service configuration types for Parley.
//!
//! `ServiceConfig` represents the optional `parley.toml` that controls the
//! listener, the upstream model, the persona set and retry behaviour.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parley service.
///
/// All fields have sensible defaults, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Model identifier passed to the upstream API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Persona used when a request names none or an unknown one.
    #[serde(default = "default_persona")]
    pub default_persona: String,

    /// Optional TOML file replacing the built-in persona set.
    #[serde(default)]
    pub personas_file: Option<String>,

    /// Per-call HTTP timeout for the upstream model.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,
}

/// Backoff settings for rate-limited model calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base of the exponential backoff; attempt `n` waits `base * 2^n`.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_persona() -> String {
    "sarah".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    6
}

fn default_base_delay_ms() -> u64 {
    5000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            default_persona: default_persona(),
            personas_file: None,
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.default_persona, "sarah");
        assert_eq!(config.retry.max_attempts, 6);
        assert_eq!(config.retry.base_delay_ms, 5000);
        assert!(config.personas_file.is_none());
    }

    #[test]
    fn test_service_config_deserialize_empty() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_service_config_deserialize_with_values() {
        let toml_str = r#"
port = 8080
model = "gemini-2.5-pro"
default_persona = "james"
personas_file = "personas.toml"

[retry]
max_attempts = 3
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.default_persona, "james");
        assert_eq!(config.personas_file.as_deref(), Some("personas.toml"));
        assert_eq!(config.retry.max_attempts, 3);
        // Unset nested field keeps its default
        assert_eq!(config.retry.base_delay_ms, 5000);
        assert_eq!(config.host, "0.0.0.0");
    }
}
