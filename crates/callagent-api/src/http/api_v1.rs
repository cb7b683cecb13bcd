//! The versioned API collection mounted at `/api/v1`.

use axum::Router;

use crate::http::gateway::RouteGroup;
use crate::http::handlers;
use crate::state::AppState;

pub const PREFIX: &str = "/api/v1";

/// All v1 endpoints. The gateway only sees its router.
pub struct ApiV1;

impl RouteGroup for ApiV1 {
    fn name(&self) -> &str {
        "api_v1"
    }

    fn routes(&self) -> Router<AppState> {
        Router::new().merge(handlers::system::routes())
    }
}
