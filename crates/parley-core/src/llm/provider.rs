//! ChatModel trait definition.
//!
//! This is the port every generative model backend implements. Uses RPITIT
//! for `generate`; see [`super::box_provider::BoxChatModel`] for the
//! object-safe wrapper used at runtime.

use parley_types::llm::LlmError;

use crate::chat::history::NormalizedHistory;

/// Everything the model needs for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInvocation {
    /// Behavioral contract of the selected persona.
    pub system_prompt: String,
    /// Turns strictly prior to `message`.
    pub history: NormalizedHistory,
    /// The in-flight user message.
    pub message: String,
}

/// Trait for generative model backends (Gemini, test doubles, ...).
///
/// Implementations live in parley-infra (e.g., `GeminiProvider`).
pub trait ChatModel: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent upstream (e.g., "gemini-2.5-flash").
    fn model(&self) -> &str;

    /// Run one conversational turn and return the model's raw text output.
    fn generate(
        &self,
        invocation: &ModelInvocation,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
