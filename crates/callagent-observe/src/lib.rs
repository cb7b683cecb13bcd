//! Observability setup for the AI Calling Agent API.
//!
//! Structured logging through `tracing`, with an optional OpenTelemetry
//! bridge for local trace inspection.

pub mod tracing_setup;
