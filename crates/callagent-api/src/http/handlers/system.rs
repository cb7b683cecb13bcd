//! Service introspection endpoints.
//!
//! GET /api/v1/health - Liveness with the service version.
//! GET /api/v1/info   - Metadata, mounted prefixes, start time.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::http::response::ApiResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: state.metadata.version.clone(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub started_at: String,
    pub mounts: Vec<String>,
}

/// GET /api/v1/info
#[utoipa::path(
    get,
    path = "/api/v1/info",
    tag = "system",
    responses((status = 200, description = "Service metadata", body = ApiResponse<ServiceInfo>))
)]
pub async fn info(State(state): State<AppState>) -> ApiResponse<ServiceInfo> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let data = ServiceInfo {
        name: state.metadata.name.clone(),
        description: state.metadata.description.clone(),
        version: state.metadata.version.clone(),
        started_at: state.started_at.to_rfc3339(),
        mounts: state.mounted_prefixes.to_vec(),
    };

    ApiResponse::success(data, request_id, start.elapsed().as_millis() as u64)
        .with_link("self", "/api/v1/info")
        .with_link("health", "/api/v1/health")
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use callagent_types::config::Settings;

    use crate::http::gateway::build_router;

    async fn get_json(uri: &str, settings: &Settings) -> (StatusCode, serde_json::Value) {
        let router = build_router(settings).unwrap();
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_configured_version() {
        let mut settings = Settings::default();
        settings.service.version = "2.3.4".to_string();

        let (status, body) = get_json("/api/v1/health", &settings).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok", "version": "2.3.4"}));
    }

    #[tokio::test]
    async fn info_returns_metadata_envelope() {
        let (status, body) = get_json("/api/v1/info", &Settings::default()).await;
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["name"], "AI Calling Agent API");
        assert_eq!(data["description"], "Backend API for AI-powered calling platform");
        assert_eq!(data["version"], "1.0.0");
        assert_eq!(data["mounts"], serde_json::json!(["/api/v1"]));
        assert!(data["started_at"].is_string());

        assert!(!body["meta"]["request_id"].as_str().unwrap().is_empty());
        assert_eq!(body["_links"]["self"], "/api/v1/info");
    }
}
