//! Routing composition logic for the AI Calling Agent API.
//!
//! This crate owns the rules for binding route groups to path prefixes.
//! It depends only on `callagent-types` -- never on the HTTP framework,
//! so the mount rules are testable without building a router.

pub mod mount;
