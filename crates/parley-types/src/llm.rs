//! LLM provider error types for Parley.

/// Errors from generative model calls.
///
/// `Api` carries every signal the upstream gave us (HTTP status, structured
/// reason such as `RESOURCE_EXHAUSTED`, free-text message) so the retry
/// layer can classify rate limiting however the provider chose to report it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("upstream error {status} {}: {message}", .reason.as_deref().unwrap_or("UNKNOWN"))]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("model returned no text")]
    EmptyResponse,

    /// The upstream withheld output, e.g. a safety block.
    #[error("response blocked by upstream: {reason}")]
    Blocked { reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// HTTP status reported by the upstream, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured reason code reported by the upstream, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            LlmError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}
