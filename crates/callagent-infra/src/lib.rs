//! Infrastructure layer for the AI Calling Agent API.
//!
//! Reads settings from disk and the process environment into the types
//! defined in `callagent-types`.

pub mod config;
