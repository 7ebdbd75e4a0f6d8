//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication. They are NOT the domain types from parley-types.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One role-tagged content block (a conversation turn or the system instruction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

/// A content part. Only text parts are produced or consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Forces JSON output when set to `application/json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Present when the prompt itself was rejected.
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Why no text came back: the prompt block reason, else a first-candidate
    /// finish reason other than `STOP`.
    pub fn block_reason(&self) -> Option<&str> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Some(reason);
        }
        self.candidates
            .first()?
            .finish_reason
            .as_deref()
            .filter(|reason| *reason != "STOP")
    }
}

/// Error response body (`{"error": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorBody {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub message: String,
    /// Canonical status, e.g. `RESOURCE_EXHAUSTED`.
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GeminiRequest {
            contents: vec![GeminiContent::text(Some("user"), "hi")],
            system_instruction: Some(GeminiContent::text(None, "be nice")),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be nice");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_first_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"reply\":"},{"text":"\"hi\"}"}]},"finishReason":"STOP"}]}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text().as_deref(), Some(r#"{"reply":"hi"}"#));
    }

    #[test]
    fn test_first_text_none_when_blocked() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        assert!(response.first_text().is_none());

        assert_eq!(response.block_reason(), Some("SAFETY"));

        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_block_reason_prefers_prompt_feedback() {
        let body = r#"{"promptFeedback":{"blockReason":"PROHIBITED_CONTENT"}}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.block_reason(), Some("PROHIBITED_CONTENT"));
    }

    #[test]
    fn test_stop_is_not_a_block_reason() {
        let body = r#"{"candidates":[{"content":{"parts":[]},"finishReason":"STOP"}]}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        assert!(response.first_text().is_none());
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_error_body() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#;
        let err: GeminiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.message, "Resource has been exhausted (e.g. check quota).");
        assert_eq!(err.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }
}
