//! Persona set: built-in tutors and the read-only registry.

pub mod builtin;
pub mod registry;
