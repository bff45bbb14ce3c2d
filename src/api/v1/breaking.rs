//! Breaking vehicle handlers.
//!
//! Listing requires a resolved identity and always returns each
//! vehicle joined with its car.

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
use crate::db::{BreakingStatus, BreakingVehicle, BreakingVehicleWithCar, Database, DbError};

use super::{CarResponse, ErrorResponse, not_found, store_fault};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct BreakingVehicleResponse {
    #[schema(example = "b1c2d3e4")]
    pub id: String,
    #[schema(example = "stripping")]
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    /// The associated car; never null.
    pub car: CarResponse,
}

impl From<BreakingVehicleWithCar> for BreakingVehicleResponse {
    fn from(v: BreakingVehicleWithCar) -> Self {
        Self {
            id: v.vehicle.id,
            status: v.vehicle.status.to_string(),
            notes: v.vehicle.notes,
            created_at: v.vehicle.created_at,
            car: CarResponse::from(v.car),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBreakingVehicleRequest {
    #[schema(example = "a1b2c3d4")]
    pub car_id: String,
    #[schema(example = "queued")]
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct BreakingVehicleCreatedResponse {
    pub id: String,
    pub car_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/v1/breaking-vehicles",
    tag = "breaking-vehicles",
    responses(
        (status = 200, description = "All breaking vehicles with their cars", body = [BreakingVehicleResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_breaking_vehicles<D, I>(
    State(state): State<AppState<D, I>>,
) -> Result<Json<Vec<BreakingVehicleResponse>>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let vehicles = state
        .db()
        .breaking_vehicles()
        .list_with_cars()
        .await
        .map_err(store_fault)?;

    Ok(Json(
        vehicles
            .into_iter()
            .map(BreakingVehicleResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/breaking-vehicles",
    tag = "breaking-vehicles",
    request_body = CreateBreakingVehicleRequest,
    responses(
        (status = 201, description = "Vehicle marked as breaking", body = BreakingVehicleCreatedResponse),
        (status = 404, description = "Referenced car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_breaking_vehicle<D, I>(
    State(state): State<AppState<D, I>>,
    Json(req): Json<CreateBreakingVehicleRequest>,
) -> Result<(StatusCode, Json<BreakingVehicleCreatedResponse>), (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let status = req
        .status
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(BreakingStatus::Queued);

    let vehicle = BreakingVehicle {
        id: String::new(), // Repository will generate this
        car_id: req.car_id,
        status,
        notes: req.notes,
        created_at: String::new(),
    };

    let created = state
        .db()
        .breaking_vehicles()
        .create(&vehicle)
        .await
        .map_err(|e| match e {
            DbError::NotFound { ref key, .. } => {
                not_found(format!("Car '{}' not found", key))
            }
            _ => store_fault(e),
        })?;

    state
        .notifier()
        .notify(UpdateMessage::BreakingVehicleCreated {
            vehicle_id: created.id.clone(),
        });

    Ok((
        StatusCode::CREATED,
        Json(BreakingVehicleCreatedResponse {
            id: created.id,
            car_id: created.car_id,
            status: created.status.to_string(),
            notes: created.notes,
            created_at: created.created_at,
        }),
    ))
}
