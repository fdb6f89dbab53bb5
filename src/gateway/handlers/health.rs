//! Service-level handlers: welcome message and health check

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::SystemState;

/// Crate version plus the git hash recorded at build time
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH"));

#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to tea house")]
    pub message: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" or "unavailable"
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "tea")]
    pub service: &'static str,
    /// Storage backend in use
    #[schema(example = "memory")]
    pub storage: &'static str,
    #[schema(example = "0.1.0+a1b2c3d")]
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    ),
    tag = "System"
)]
pub async fn root(State(state): State<SystemState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: state.service.welcome(),
    })
}

/// Health check endpoint
///
/// - Healthy: 200 OK + `{status: "ok", ...}`
/// - Storage unreachable: 503 + `{status: "unavailable", ...}`
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Storage unavailable", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<SystemState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.probe.is_healthy().await;
    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };
    (
        status,
        Json(HealthResponse {
            status: label,
            service: state.service.name(),
            storage: state.probe.backend(),
            version: VERSION,
        }),
    )
}
