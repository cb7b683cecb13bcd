//! HTTP layer for the AI Calling Agent API.
//!
//! Axum gateway with a root welcome endpoint, the versioned API under
//! `/api/v1/`, an OpenAPI document, CORS, and request tracing.

pub mod api_v1;
pub mod cors;
pub mod gateway;
pub mod handlers;
pub mod openapi;
pub mod response;
