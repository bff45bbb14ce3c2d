//! System and public webhook handlers.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service banner"))
)]
#[instrument]
pub async fn root() -> &'static str {
    "breakyard API"
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Health check successful", body = HealthResponse))
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Daily checks webhook.
///
/// Intentionally open endpoint on the public allowlist; callers only
/// need reachability, so the handler acknowledges and nothing more.
#[utoipa::path(
    get,
    path = "/api/dailychecks",
    tag = "system",
    responses((status = 204, description = "Acknowledged"))
)]
#[instrument]
pub async fn dailychecks() -> StatusCode {
    info!("daily checks ping received");
    StatusCode::NO_CONTENT
}

/// Session-revocation webhook from the identity provider.
///
/// Session state lives with the provider; this endpoint only
/// acknowledges the callback.
#[utoipa::path(
    post,
    path = "/api/revoke-sessions",
    tag = "system",
    responses((status = 204, description = "Acknowledged"))
)]
#[instrument]
pub async fn revoke_sessions() -> StatusCode {
    info!("session revocation callback received");
    StatusCode::NO_CONTENT
}
