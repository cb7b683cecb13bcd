//! Gateway assembly: metadata, middleware chain, and route-group mounts.
//!
//! Every inbound request flows through one router built here:
//!
//! ```text
//! TraceLayer -> [origin echo] -> CorsLayer -> dispatch
//!                                             ├── GET /              welcome
//!                                             ├── GET /openapi.json  OpenAPI document
//!                                             ├── /api/v1/...        ApiV1
//!                                             └── (unmatched)        404
//! ```
//!
//! CORS wraps the routes and the fallback, so preflight requests are
//! answered before dispatch and error responses still carry the policy.
//! The router is immutable once built.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use callagent_core::mount::MountTable;
use callagent_types::config::{CorsConfig, ServiceMetadata, Settings};
use callagent_types::error::{GatewayError, MountError};

use crate::http::api_v1::{self, ApiV1};
use crate::http::cors::{build_cors, echo_credentialed_origin};
use crate::http::{handlers, openapi};
use crate::state::AppState;

/// Anything that can be mounted under a prefix.
///
/// The gateway never looks inside `routes()`; requests under the prefix
/// are forwarded with the prefix stripped and the response returned as is.
pub trait RouteGroup: Send + Sync {
    /// Name used in logs and collision errors.
    fn name(&self) -> &str;

    fn routes(&self) -> Router<AppState>;
}

/// The application under construction.
pub struct Gateway {
    metadata: ServiceMetadata,
    cors: Option<CorsConfig>,
    mounts: MountTable<Router<AppState>>,
}

impl Gateway {
    /// Create an application with its descriptive metadata and no routes
    /// besides the root welcome endpoint.
    pub fn initialize(metadata: ServiceMetadata) -> Self {
        tracing::debug!(name = %metadata.name, version = %metadata.version, "Initializing gateway");
        Self {
            metadata,
            cors: None,
            mounts: MountTable::new(),
        }
    }

    /// Declare the cross-origin policy applied to every request.
    ///
    /// Registering again before [`Gateway::build`] replaces the policy.
    pub fn register_middleware(&mut self, policy: CorsConfig) -> &mut Self {
        if self.cors.is_some() {
            tracing::debug!("Replacing previously registered CORS policy");
        }
        self.cors = Some(policy);
        self
    }

    /// Bind `group` under `prefix`.
    ///
    /// Fails on an invalid prefix or one that collides with an existing
    /// mount; the gateway is unchanged in that case.
    pub fn mount_route_group<G: RouteGroup + ?Sized>(
        &mut self,
        group: &G,
        prefix: &str,
    ) -> Result<&mut Self, MountError> {
        let mount = self.mounts.mount(prefix, group.name(), group.routes())?;
        tracing::info!(prefix = %mount.prefix, group = %mount.name, "Mounted route group");
        Ok(self)
    }

    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    /// Mounted prefixes in mount order.
    pub fn prefixes(&self) -> Vec<&str> {
        self.mounts.prefixes()
    }

    /// Freeze the gateway into the router served to clients.
    pub fn build(self) -> Result<Router, GatewayError> {
        let cors = self.cors.as_ref().map(build_cors).transpose()?;

        let prefixes = self.mounts.iter().map(|m| m.prefix.clone()).collect();
        let state = AppState::new(self.metadata, prefixes);

        let mut router = Router::new()
            .route("/", get(handlers::root::root))
            .route(openapi::PATH, get(openapi::openapi_json));
        for mount in self.mounts.into_mounts() {
            router = router.nest(&mount.prefix, mount.group);
        }
        let mut router = router.with_state(state);

        if let Some(stack) = cors {
            router = router.layer(stack.cors);
            if stack.wildcard_credentials {
                router = router.layer(axum::middleware::from_fn(echo_credentialed_origin));
            }
        } else {
            tracing::warn!("No CORS policy registered; cross-origin browser requests will fail");
        }

        Ok(router.layer(TraceLayer::new_for_http()))
    }
}

/// Assemble the production gateway: metadata and CORS from `settings`,
/// the v1 collection at `/api/v1`.
pub fn from_settings(settings: &Settings) -> Result<Gateway, GatewayError> {
    let mut gateway = Gateway::initialize(settings.service.clone());
    gateway
        .register_middleware(settings.cors.clone())
        .mount_route_group(&ApiV1, api_v1::PREFIX)?;
    Ok(gateway)
}

/// [`from_settings`] followed by [`Gateway::build`].
pub fn build_router(settings: &Settings) -> Result<Router, GatewayError> {
    from_settings(settings)?.build()
}
