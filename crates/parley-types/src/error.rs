use thiserror::Error;

use crate::llm::LlmError;

/// Errors from handling one chat turn.
///
/// Unparseable model output is deliberately absent: it degrades to a plain
/// reply instead of failing the request.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("rate limited after {attempts} attempt(s): {source}")]
    RateLimited { attempts: u32, source: LlmError },

    #[error("model call failed after {attempts} attempt(s): {source}")]
    Upstream { attempts: u32, source: LlmError },
}

impl ChatError {
    /// The underlying model error, if the failure came from the model call.
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            ChatError::Validation(_) => None,
            ChatError::RateLimited { source, .. } | ChatError::Upstream { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Errors raised while assembling configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("default persona '{0}' is not in the persona set")]
    MissingDefaultPersona(String),

    #[error("duplicate persona id '{0}'")]
    DuplicatePersona(String),

    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),
}
