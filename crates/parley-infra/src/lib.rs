//! Infrastructure layer for Parley.
//!
//! Contains implementations of the traits defined in `parley-core`: the
//! Gemini model backend, plus configuration and persona file loading.

pub mod config;
pub mod llm;
pub mod persona;
