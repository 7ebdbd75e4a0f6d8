//! Chat orchestrator: one user message in, one [`ChatResult`] out.
//!
//! validate -> resolve persona -> normalize history -> invoke model with
//! retry -> interpret output. Each request is independent; the only shared
//! state is the read-only persona registry.

use std::sync::Arc;

use tracing::Instrument;

use parley_types::chat::{ChatRequest, ChatResult, RawTurn};
use parley_types::error::ChatError;
use parley_types::llm::LlmError;

use crate::chat::history::HistoryNormalizer;
use crate::chat::interpreter::ResponseInterpreter;
use crate::llm::box_provider::BoxChatModel;
use crate::llm::provider::ModelInvocation;
use crate::llm::retry::{RateLimitClassifier, RetryError, RetryExecutor, TransientClassifier};
use crate::persona::registry::PersonaRegistry;

/// Validation message for a missing or empty user message.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Composes persona lookup, history normalization, retried model
/// invocation and output interpretation.
pub struct ChatOrchestrator<C = RateLimitClassifier> {
    personas: Arc<PersonaRegistry>,
    model: BoxChatModel,
    retry: RetryExecutor<C>,
}

impl<C: TransientClassifier<LlmError>> ChatOrchestrator<C> {
    pub fn new(personas: Arc<PersonaRegistry>, model: BoxChatModel, retry: RetryExecutor<C>) -> Self {
        Self {
            personas,
            model,
            retry,
        }
    }

    pub fn personas(&self) -> &PersonaRegistry {
        &self.personas
    }

    pub fn model(&self) -> &BoxChatModel {
        &self.model
    }

    /// Handle a deserialized request body.
    pub async fn handle_request(&self, request: ChatRequest) -> Result<ChatResult, ChatError> {
        self.handle(
            request.message.as_deref(),
            request.persona_id.as_deref(),
            request.history.as_deref(),
        )
        .await
    }

    /// Handle one chat turn.
    ///
    /// `history` holds the turns strictly before `message`.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Validation`] if `message` is missing or empty; nothing
    ///   else runs in that case.
    /// - [`ChatError::RateLimited`] if the model stayed rate limited through
    ///   every attempt.
    /// - [`ChatError::Upstream`] for any other model failure.
    pub async fn handle(
        &self,
        message: Option<&str>,
        persona_id: Option<&str>,
        history: Option<&[RawTurn]>,
    ) -> Result<ChatResult, ChatError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ChatError::Validation(MESSAGE_REQUIRED.to_string())),
        };

        let persona = self.personas.resolve(persona_id);
        let history = HistoryNormalizer::normalize(history.unwrap_or_default());

        let invocation = ModelInvocation {
            system_prompt: persona.system_prompt.clone(),
            history,
            message: message.to_string(),
        };

        let span = tracing::info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %self.model.name(),
            gen_ai.request.model = %self.model.model(),
            gen_ai.agent.id = %persona.id,
            history_turns = invocation.history.len(),
        );

        let raw = self
            .retry
            .execute(|| self.model.generate(&invocation))
            .instrument(span)
            .await
            .map_err(Self::classify_failure)?;

        tracing::debug!(raw = %raw, "Raw model response");

        Ok(ResponseInterpreter::interpret(&raw, message))
    }

    /// Map the final retry failure onto the rate-limited / upstream split.
    fn classify_failure(err: RetryError<LlmError>) -> ChatError {
        let RetryError {
            last_error,
            attempts,
            transient,
        } = err;

        if transient {
            tracing::error!(attempts, error = %last_error, "Model still rate limited after retries");
            ChatError::RateLimited {
                attempts,
                source: last_error,
            }
        } else {
            tracing::error!(attempts, error = %last_error, "Model call failed");
            ChatError::Upstream {
                attempts,
                source: last_error,
            }
        }
    }
}
