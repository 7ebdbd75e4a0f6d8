//! Application state wiring the chat pipeline together.
//!
//! AppState pins the orchestrator to the concrete Gemini backend loaded from
//! configuration. Handlers only ever see the orchestrator.

use std::sync::Arc;

use parley_core::chat::orchestrator::ChatOrchestrator;
use parley_core::llm::retry::{RetryExecutor, RetryPolicy};
use parley_infra::config::{process_env, resolve_api_key};
use parley_infra::llm::create_provider;
use parley_infra::persona::build_registry;
use parley_types::config::ServiceConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build the persona registry, model backend and retry policy from
    /// `config`. Fails before serving if any of them is misconfigured.
    pub async fn init(config: &ServiceConfig) -> anyhow::Result<Self> {
        let personas = build_registry(config).await?;
        let api_key = resolve_api_key(config, process_env)?;
        let model = create_provider(config, api_key)?;

        let policy = RetryPolicy::from(&config.retry);
        tracing::info!(
            max_attempts = policy.max_attempts,
            base_delay_ms = policy.base_delay.as_millis() as u64,
            "Retry policy configured"
        );

        let orchestrator =
            ChatOrchestrator::new(Arc::new(personas), model, RetryExecutor::rate_limited(policy));
        Ok(Self::new(orchestrator))
    }
}
