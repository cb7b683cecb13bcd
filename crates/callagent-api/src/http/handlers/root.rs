//! GET / - Welcome endpoint.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub const WELCOME_MESSAGE: &str = "Welcome to AI Calling Agent API";

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
}

/// GET / - Fixed welcome payload, always 200.
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Welcome message", body = WelcomeMessage))
)]
pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: WELCOME_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn welcome_payload_is_fixed() {
        let Json(body) = root().await;
        let body = serde_json::to_value(body).unwrap();
        assert_eq!(body, json!({"message": "Welcome to AI Calling Agent API"}));
        assert_eq!(body.as_object().unwrap().len(), 1);
    }
}
