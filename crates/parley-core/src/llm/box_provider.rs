//! BoxChatModel -- object-safe dynamic dispatch wrapper for ChatModel.
//!
//! 1. Define an object-safe `ChatModelDyn` trait with boxed futures
//! 2. Blanket-impl `ChatModelDyn` for all `T: ChatModel`
//! 3. `BoxChatModel` wraps `Box<dyn ChatModelDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use parley_types::llm::LlmError;

use super::provider::{ChatModel, ModelInvocation};

/// Object-safe version of [`ChatModel`] with boxed futures.
pub trait ChatModelDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        invocation: &'a ModelInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

/// Blanket implementation: any `ChatModel` automatically implements `ChatModelDyn`.
impl<T: ChatModel> ChatModelDyn for T {
    fn name(&self) -> &str {
        ChatModel::name(self)
    }

    fn model(&self) -> &str {
        ChatModel::model(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        invocation: &'a ModelInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(invocation))
    }
}

/// Type-erased model backend for runtime selection.
///
/// Since `ChatModel` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxChatModel` provides equivalent methods that delegate to the
/// inner `ChatModelDyn` trait object.
pub struct BoxChatModel {
    inner: Box<dyn ChatModelDyn + Send + Sync>,
}

impl BoxChatModel {
    /// Wrap a concrete `ChatModel` in a type-erased box.
    pub fn new<T: ChatModel + 'static>(model: T) -> Self {
        Self {
            inner: Box::new(model),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Run one conversational turn and return the raw text output.
    pub async fn generate(&self, invocation: &ModelInvocation) -> Result<String, LlmError> {
        self.inner.generate_boxed(invocation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::history::NormalizedHistory;

    struct EchoModel;

    impl ChatModel for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, invocation: &ModelInvocation) -> Result<String, LlmError> {
            Ok(format!("{}|{}", invocation.system_prompt, invocation.message))
        }
    }

    #[tokio::test]
    async fn test_box_delegates() {
        let boxed = BoxChatModel::new(EchoModel);
        assert_eq!(boxed.name(), "echo");
        assert_eq!(boxed.model(), "echo-1");

        let invocation = ModelInvocation {
            system_prompt: "sys".to_string(),
            history: NormalizedHistory::empty(),
            message: "hi".to_string(),
        };
        assert_eq!(boxed.generate(&invocation).await.unwrap(), "sys|hi");
    }
}
