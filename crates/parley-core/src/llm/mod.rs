//! Model invocation abstractions for Parley.
//!
//! - `ChatModel`: RPITIT trait for concrete model backends
//! - `BoxChatModel`: Object-safe wrapper for dynamic dispatch
//! - `RetryExecutor`: bounded retry with rate-limit classification

pub mod box_provider;
pub mod provider;
pub mod retry;
