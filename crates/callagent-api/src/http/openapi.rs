//! OpenAPI 3.1 document generated from the handler annotations.
//!
//! GET /openapi.json - the document, with `info` taken from the configured
//! [`ServiceMetadata`].

use axum::Json;
use axum::extract::State;
use utoipa::OpenApi;

use callagent_types::config::ServiceMetadata;

use crate::http::handlers;
use crate::state::AppState;

pub const PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root::root,
        handlers::system::health,
        handlers::system::info,
    ),
    tags(
        (name = "root", description = "Welcome endpoint"),
        (name = "system", description = "Service introspection"),
    )
)]
struct ApiDoc;

/// Build the document for a service described by `metadata`.
pub fn document(metadata: &ServiceMetadata) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = metadata.name.clone();
    doc.info.description = Some(metadata.description.clone());
    doc.info.version = metadata.version.clone();
    doc
}

/// GET /openapi.json
pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(document(&state.metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_root_and_v1_paths() {
        let doc = document(&ServiceMetadata::default());
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/"));
        assert!(paths.contains(&"/api/v1/health"));
        assert!(paths.contains(&"/api/v1/info"));
    }

    #[test]
    fn info_follows_service_metadata() {
        let metadata = ServiceMetadata {
            name: "Calls".to_string(),
            description: "Outbound calls".to_string(),
            version: "2.0.0".to_string(),
        };
        let doc = document(&metadata);

        assert_eq!(doc.info.title, "Calls");
        assert_eq!(doc.info.description.as_deref(), Some("Outbound calls"));
        assert_eq!(doc.info.version, "2.0.0");
    }
}
