//! GeminiProvider -- concrete [`ChatModel`] implementation for Google Gemini.
//!
//! Sends non-streaming requests to `{base}/models/{model}:generateContent`
//! with the persona prompt as `systemInstruction` and JSON output forced
//! through `generationConfig.responseMimeType`.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is sent as the
//! `x-goog-api-key` header, never in the URL, so it cannot leak into logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parley_core::llm::provider::{ChatModel, ModelInvocation};
use parley_types::chat::Role;
use parley_types::llm::LlmError;

use super::types::{
    GeminiContent, GeminiErrorBody, GeminiRequest, GeminiResponse, GenerationConfig,
};

/// Google Gemini model backend.
///
/// Does NOT derive Debug so the API key can never end up in debug output.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Default API base.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a new Gemini provider.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Provider`] if the HTTP client cannot be built.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Convert a [`ModelInvocation`] into a [`GeminiRequest`].
    ///
    /// History turns come first, then the in-flight message as the final
    /// user turn.
    fn to_gemini_request(invocation: &ModelInvocation) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = invocation
            .history
            .iter()
            .map(|turn| GeminiContent::text(Some(turn.role.as_str()), turn.text.clone()))
            .collect();
        contents.push(GeminiContent::text(
            Some(Role::User.as_str()),
            invocation.message.clone(),
        ));

        GeminiRequest {
            contents,
            system_instruction: Some(GeminiContent::text(None, invocation.system_prompt.clone())),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        }
    }
}

/// Pull the reply text out of a successful response.
///
/// A response without text is [`LlmError::Blocked`] when Gemini said why,
/// otherwise [`LlmError::EmptyResponse`].
fn extract_text(response: GeminiResponse) -> Result<String, LlmError> {
    if let Some(text) = response.first_text() {
        return Ok(text);
    }
    match response.block_reason() {
        Some(reason) => Err(LlmError::Blocked {
            reason: reason.to_string(),
        }),
        None => Err(LlmError::EmptyResponse),
    }
}

/// Error body text, or a description of why it could not be read.
fn error_body_text<E: std::fmt::Display>(read: Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read Gemini error body");
            format!("failed to read error body: {e}")
        }
    }
}

/// Map a non-success HTTP response onto [`LlmError`].
///
/// Keeps the upstream's canonical status (e.g. `RESOURCE_EXHAUSTED`) as the
/// reason so rate limiting can be recognised from any signal.
fn map_error_response(status: u16, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GeminiErrorBody>(body).ok();

    if matches!(status, 401 | 403) {
        return LlmError::AuthenticationFailed;
    }

    match parsed {
        Some(GeminiErrorBody { error }) => LlmError::Api {
            status,
            reason: error.status,
            message: error.message,
        },
        None => LlmError::Api {
            status,
            reason: None,
            message: body.to_string(),
        },
    }
}

impl ChatModel for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, invocation: &ModelInvocation) -> Result<String, LlmError> {
        let body = Self::to_gemini_request(invocation);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = error_body_text(response.text().await);
            tracing::warn!(status = %status, "Gemini API error response");
            return Err(map_error_response(status.as_u16(), &error_body));
        }

        let gemini_resp: GeminiResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        extract_text(gemini_resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::chat::history::HistoryNormalizer;
    use parley_types::chat::RawTurn;

    fn make_provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key"),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_url() {
        let provider = make_provider();
        assert_eq!(
            provider.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let provider = make_provider().with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            provider.url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_to_gemini_request() {
        let history = HistoryNormalizer::normalize(&[
            RawTurn::new("user", "hi"),
            RawTurn::new("ai", "hello"),
        ]);
        let invocation = ModelInvocation {
            system_prompt: "You are Sarah.".to_string(),
            history,
            message: "How are you?".to_string(),
        };

        let request = GeminiProvider::to_gemini_request(&invocation);
        let roles: Vec<&str> = request
            .contents
            .iter()
            .map(|c| c.role.as_deref().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(
            request.contents[2].parts[0].text.as_deref(),
            Some("How are you?")
        );
        let system = request.system_instruction.unwrap();
        assert!(system.role.is_none());
        assert_eq!(system.parts[0].text.as_deref(), Some("You are Sarah."));
        assert_eq!(
            request.generation_config.unwrap().response_mime_type.as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn test_extract_text_reports_block_reason() {
        let blocked: GeminiResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(
            extract_text(blocked),
            Err(LlmError::Blocked {
                reason: "SAFETY".to_string()
            })
        );

        let empty: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(empty), Err(LlmError::EmptyResponse));

        let ok: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(ok).as_deref(), Ok("hi"));
    }

    #[test]
    fn test_map_rate_limit_response() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_error_response(429, body);
        assert_eq!(
            err,
            LlmError::Api {
                status: 429,
                reason: Some("RESOURCE_EXHAUSTED".to_string()),
                message: "Resource has been exhausted".to_string(),
            }
        );
    }

    #[test]
    fn test_map_auth_response() {
        let body = r#"{"error":{"code":403,"message":"denied","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(map_error_response(403, body), LlmError::AuthenticationFailed);
        assert_eq!(map_error_response(401, ""), LlmError::AuthenticationFailed);
    }

    #[test]
    fn test_unreadable_error_body_keeps_cause() {
        let body = error_body_text::<String>(Err("connection closed".to_string()));
        assert_eq!(
            map_error_response(503, &body),
            LlmError::Api {
                status: 503,
                reason: None,
                message: "failed to read error body: connection closed".to_string(),
            }
        );
        assert_eq!(error_body_text::<String>(Ok("raw".to_string())), "raw");
    }

    #[test]
    fn test_map_unstructured_body() {
        let err = map_error_response(502, "Bad Gateway");
        assert_eq!(
            err,
            LlmError::Api {
                status: 502,
                reason: None,
                message: "Bad Gateway".to_string(),
            }
        );
    }
}
