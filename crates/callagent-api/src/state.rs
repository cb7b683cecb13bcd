//! Read-only state shared by every request handler.
//!
//! Built once when the gateway is assembled and cloned cheaply into each
//! request; nothing in it is mutated after startup.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use callagent_types::config::ServiceMetadata;

#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<ServiceMetadata>,
    /// Route-group prefixes in mount order.
    pub mounted_prefixes: Arc<[String]>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(metadata: ServiceMetadata, mounted_prefixes: Vec<String>) -> Self {
        Self {
            metadata: Arc::new(metadata),
            mounted_prefixes: mounted_prefixes.into(),
            started_at: Utc::now(),
        }
    }
}
