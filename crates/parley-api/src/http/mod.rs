//! HTTP/REST API layer for Parley.
//!
//! Axum-based API served both at the root and under `/api`, with flat JSON
//! error bodies and permissive CORS for the web client.

pub mod error;
pub mod handlers;
pub mod router;
