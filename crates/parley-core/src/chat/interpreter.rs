//! Interpretation of the model's raw output.
//!
//! Personas instruct the model to answer with
//! `{"reply": "...", "feedback": {"hasFeedback": bool, "type", "content", "context"}}`.
//! Models do not always comply, so parsing yields an explicit
//! [`ModelOutput`]: either the structured envelope or the raw text as-is.
//! The degraded path is a normal outcome, never an error.
//!
//! All default-filling for feedback lives in [`FeedbackSignal::into_item`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use parley_types::chat::{ChatResult, FeedbackItem, FeedbackType};

/// Result of parsing raw model text.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// The text was a JSON object in the expected envelope shape.
    Structured {
        reply: Option<String>,
        feedback: Option<FeedbackSignal>,
    },
    /// The text was not a JSON object; it is the reply verbatim.
    Degraded(String),
}

/// A correction the model flagged, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedbackSignal {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl FeedbackSignal {
    /// Fill in defaults: unknown or missing type becomes vocabulary, missing
    /// context becomes the user's original message, missing content is empty.
    pub fn into_item(self, fallback_context: &str) -> FeedbackItem {
        let kind = self
            .kind
            .as_deref()
            .and_then(|k| k.parse::<FeedbackType>().ok())
            .unwrap_or_default();

        FeedbackItem {
            kind,
            content: self.content.unwrap_or_default(),
            context: self
                .context
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| fallback_context.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackEnvelope {
    #[serde(default, deserialize_with = "loose_flag")]
    has_feedback: bool,
    #[serde(flatten)]
    signal: FeedbackSignal,
}

/// Models sometimes quote booleans. `true`, `"true"` (any case) and non-zero
/// numbers are set; everything else is unset.
fn loose_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    };
    Ok(flag)
}

/// Stateless interpreter turning raw model text into a [`ChatResult`].
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    /// Parse raw model text into a [`ModelOutput`].
    pub fn parse(raw: &str) -> ModelOutput {
        let object = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => object,
            Ok(_) | Err(_) => {
                tracing::debug!("Model output is not a JSON object, using raw text as reply");
                return ModelOutput::Degraded(raw.to_string());
            }
        };

        let reply = object
            .get("reply")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        let feedback = object
            .get("feedback")
            .cloned()
            .and_then(|value| match serde_json::from_value::<FeedbackEnvelope>(value) {
                Ok(envelope) => Some(envelope),
                Err(err) => {
                    tracing::debug!(error = %err, "Ignoring malformed feedback block");
                    None
                }
            })
            .filter(|envelope| envelope.has_feedback)
            .map(|envelope| envelope.signal);

        ModelOutput::Structured { reply, feedback }
    }

    /// Interpret raw model text. Never fails.
    ///
    /// `fallback_message` is the user's original message, used as feedback
    /// context when the model does not quote one.
    pub fn interpret(raw: &str, fallback_message: &str) -> ChatResult {
        match Self::parse(raw) {
            ModelOutput::Structured { reply, feedback } => ChatResult {
                reply: reply.unwrap_or_else(|| raw.to_string()),
                feedback: feedback.map(|signal| signal.into_item(fallback_message)),
            },
            ModelOutput::Degraded(text) => ChatResult::plain(text),
        }
    }
}
