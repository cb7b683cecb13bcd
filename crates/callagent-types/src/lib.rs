//! Shared types for the AI Calling Agent API.
//!
//! Settings consumed at startup and the error types raised while loading
//! them or assembling the gateway.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
