//! Car handlers.
//!
//! Cars are keyed by their unique registration; the paint-code update
//! is a registration-keyed partial update.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::notifier::UpdateMessage;
use crate::auth::IdentityResolver;
use crate::db::{Car, Database, DbError};

use super::{ErrorResponse, not_found, store_fault};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct CarResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "AB12CDE")]
    pub reg: String,
    #[schema(example = "Ford")]
    pub make: Option<String>,
    #[schema(example = "Focus")]
    pub model: Option<String>,
    #[schema(example = "PN4CV")]
    pub paint_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Car> for CarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            reg: c.reg,
            make: c.make,
            model: c.model,
            paint_code: c.paint_code,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    #[schema(example = "AB12CDE")]
    pub reg: String,
    #[schema(example = "Ford")]
    pub make: Option<String>,
    #[schema(example = "Focus")]
    pub model: Option<String>,
    #[schema(example = "PN4CV")]
    pub paint_code: Option<String>,
}

/// Paint-code update request. A null/omitted code clears the field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCarPaintRequest {
    #[schema(example = "PN4CV")]
    pub paint_code: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/v1/cars",
    tag = "cars",
    responses(
        (status = 200, description = "All cars", body = [CarResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_cars<D, I>(
    State(state): State<AppState<D, I>>,
) -> Result<Json<Vec<CarResponse>>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let cars = state.db().cars().list().await.map_err(store_fault)?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/v1/cars/{reg}",
    tag = "cars",
    params(("reg" = String, Path, description = "Car registration")),
    responses(
        (status = 200, description = "Car found", body = CarResponse),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_car<D, I>(
    State(state): State<AppState<D, I>>,
    Path(reg): Path<String>,
) -> Result<Json<CarResponse>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let car = state
        .db()
        .cars()
        .get_by_reg(&reg)
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => not_found(format!("Car '{}' not found", reg)),
            _ => store_fault(e),
        })?;

    Ok(Json(CarResponse::from(car)))
}

#[utoipa::path(
    post,
    path = "/v1/cars",
    tag = "cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 409, description = "Registration already known", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_car<D, I>(
    State(state): State<AppState<D, I>>,
    Json(req): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let car = Car {
        id: String::new(), // Repository will generate this
        reg: req.reg,
        make: req.make,
        model: req.model,
        paint_code: req.paint_code,
        created_at: String::new(),
        updated_at: String::new(),
    };

    let created = state.db().cars().create(&car).await.map_err(|e| match e {
        DbError::AlreadyExists { .. } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        _ => store_fault(e),
    })?;

    state.notifier().notify(UpdateMessage::CarCreated {
        car_id: created.id.clone(),
    });

    Ok((StatusCode::CREATED, Json(CarResponse::from(created))))
}

#[utoipa::path(
    patch,
    path = "/v1/cars/{reg}",
    tag = "cars",
    params(("reg" = String, Path, description = "Car registration")),
    request_body = UpdateCarPaintRequest,
    responses(
        (status = 200, description = "Paint code updated", body = CarResponse),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_car_paint<D, I>(
    State(state): State<AppState<D, I>>,
    Path(reg): Path<String>,
    Json(req): Json<UpdateCarPaintRequest>,
) -> Result<Json<CarResponse>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let updated = state
        .db()
        .cars()
        .update_paint_code(&reg, req.paint_code.as_deref())
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => not_found(format!("Car '{}' not found", reg)),
            _ => store_fault(e),
        })?;

    state.notifier().notify(UpdateMessage::CarUpdated {
        car_id: updated.id.clone(),
    });

    Ok(Json(CarResponse::from(updated)))
}
