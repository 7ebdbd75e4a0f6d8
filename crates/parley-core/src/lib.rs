//! Business logic and model port definitions for Parley.
//!
//! This crate defines the `ChatModel` port that the infrastructure layer
//! implements, plus the pure conversation logic around it. It depends only
//! on `parley-types` -- never on `parley-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod persona;
