//! HTTP request handlers.

pub mod root;
pub mod system;
