//! Google Gemini provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`ChatModel`](parley_core::llm::provider::ChatModel) trait for the
//! Gemini `generateContent` API.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
