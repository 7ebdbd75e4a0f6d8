//! Conversation handling: history normalization, output interpretation and
//! the orchestrator that composes them around a model call.

pub mod history;
pub mod interpreter;
pub mod orchestrator;
