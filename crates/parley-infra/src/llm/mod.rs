//! Model provider implementations.
//!
//! Contains concrete implementations of the [`ChatModel`] trait defined in
//! `parley-core`, plus [`create_provider`] which builds the configured one.
//!
//! [`ChatModel`]: parley_core::llm::provider::ChatModel

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use parley_core::llm::box_provider::BoxChatModel;
use parley_types::config::ServiceConfig;
use parley_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Build the configured model backend behind a [`BoxChatModel`].
///
/// # Errors
///
/// Returns [`LlmError::Provider`] if the HTTP client cannot be created.
pub fn create_provider(
    config: &ServiceConfig,
    api_key: SecretString,
) -> Result<BoxChatModel, LlmError> {
    let provider = GeminiProvider::new(
        api_key,
        config.model.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?
    .with_base_url(config.api_base.clone());

    tracing::info!(provider = "gemini", model = %config.model, "Model provider ready");
    Ok(BoxChatModel::new(provider))
}
