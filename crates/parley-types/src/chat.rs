//! Conversation types: turns as the caller sends them, turns as the model
//! sees them, and the stable result contract returned to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Speaker role of a turn, as understood by the downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Map a caller-supplied sender label to a role.
    ///
    /// Only the exact label `"user"` maps to [`Role::User`]; every other
    /// label (including `"ai"`, `"bot"` or an empty string) is the model.
    pub fn from_sender(sender: &str) -> Self {
        if sender == "user" {
            Role::User
        } else {
            Role::Model
        }
    }

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One utterance in a conversation, tagged with its speaker role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// A history entry exactly as the caller sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTurn {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender: String,
}

impl RawTurn {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: sender.into(),
        }
    }

    /// Convert into a [`Turn`] using the sender-label rule.
    pub fn to_turn(&self) -> Turn {
        Turn::new(Role::from_sender(&self.sender), self.text.clone())
    }
}

/// Inbound chat request body (`POST /chat`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    /// A value that is not an array is treated as absent; array entries
    /// that are not turn objects are skipped.
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Option<Vec<RawTurn>>,
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Option<Vec<RawTurn>>, D::Error>
where
    D: Deserializer<'de>,
{
    let history = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<RawTurn>(item).ok())
                .collect(),
        ),
        _ => None,
    };
    Ok(history)
}

/// Category of a learning tip attached to a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Grammar,
    #[default]
    Vocabulary,
    Tone,
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackType::Grammar => write!(f, "grammar"),
            FeedbackType::Vocabulary => write!(f, "vocabulary"),
            FeedbackType::Tone => write!(f, "tone"),
        }
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grammar" => Ok(FeedbackType::Grammar),
            "vocabulary" => Ok(FeedbackType::Vocabulary),
            "tone" => Ok(FeedbackType::Tone),
            other => Err(format!("invalid feedback type: '{other}'")),
        }
    }
}

/// A correction or tip the model produced about the user's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub content: String,
    pub context: String,
}

/// The stable response contract for one chat turn.
///
/// `feedback` serializes as `null` when the model made no correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub reply: String,
    pub feedback: Option<FeedbackItem>,
}

impl ChatResult {
    /// A reply with no feedback attached.
    pub fn plain(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            feedback: None,
        }
    }
}
