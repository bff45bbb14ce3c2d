//! Weight log handlers.
//!
//! "Latest" is defined by the recorded_at ordering; the store's
//! insertion order plays no part.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::notifier::UpdateMessage;
use crate::auth::IdentityResolver;
use crate::db::{Database, WeightEntry};

use super::{ErrorResponse, not_found, store_fault};

#[derive(Serialize, ToSchema)]
pub struct WeightResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = 1180.5)]
    pub kilograms: f64,
    #[schema(example = "2026-03-01 08:30:00")]
    pub recorded_at: String,
    pub created_at: String,
}

impl From<WeightEntry> for WeightResponse {
    fn from(w: WeightEntry) -> Self {
        Self {
            id: w.id,
            kilograms: w.kilograms,
            recorded_at: w.recorded_at,
            created_at: w.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordWeightRequest {
    #[schema(example = 1180.5)]
    pub kilograms: f64,
    /// Weighbridge timestamp; defaults to now when omitted.
    #[schema(example = "2026-03-01 08:30:00")]
    pub recorded_at: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/weights/latest",
    tag = "weights",
    responses(
        (status = 200, description = "Newest entry by recorded_at", body = WeightResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Weight log is empty", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn latest_weight<D, I>(
    State(state): State<AppState<D, I>>,
) -> Result<Json<WeightResponse>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let entry = state.db().weights().latest().await.map_err(store_fault)?;

    let entry = entry.ok_or_else(|| not_found("Weight log is empty".to_string()))?;

    Ok(Json(WeightResponse::from(entry)))
}

#[utoipa::path(
    post,
    path = "/v1/weights",
    tag = "weights",
    request_body = RecordWeightRequest,
    responses(
        (status = 201, description = "Entry recorded", body = WeightResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn record_weight<D, I>(
    State(state): State<AppState<D, I>>,
    Json(req): Json<RecordWeightRequest>,
) -> Result<(StatusCode, Json<WeightResponse>), (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let entry = WeightEntry {
        id: String::new(), // Repository will generate this
        kilograms: req.kilograms,
        recorded_at: req.recorded_at.unwrap_or_default(),
        created_at: String::new(),
    };

    let created = state
        .db()
        .weights()
        .create(&entry)
        .await
        .map_err(store_fault)?;

    state.notifier().notify(UpdateMessage::WeightRecorded {
        entry_id: created.id.clone(),
    });

    Ok((StatusCode::CREATED, Json(WeightResponse::from(created))))
}
