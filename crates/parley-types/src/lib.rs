//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley service:
//! Persona, Turn, the chat request/result contract, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
