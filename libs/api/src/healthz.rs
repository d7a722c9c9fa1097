use axum::{extract::State, Json};
use generation::Operation;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ApiState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when no model api key is configured.
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub services: Services,
    pub endpoints: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct Services {
    pub gemini: String,
    pub speech: String,
}

/// Service health
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let configured = state.models.has_api_key();

    Json(HealthResponse {
        status: if configured { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: Services {
            gemini: if configured { "configured" } else { "missing" }
                .to_string(),
            speech: "mock".to_string(),
        },
        endpoints: Operation::names(),
    })
}
