//! V1 API handlers.

mod breaking;
mod cars;
mod tasks;
mod users;
mod weights;

#[cfg(test)]
mod cars_test;
#[cfg(test)]
mod weights_test;

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbError;

pub use breaking::*;
pub use cars::*;
pub use tasks::*;
pub use users::*;
pub use weights::*;

/// Error payload returned by every failing endpoint.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Entity not found: Car with key 'AB12CDE'")]
    pub error: String,
}

/// Map a store fault to a 500, logging the underlying error.
pub(super) fn store_fault(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    error!("store fault: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// 404 with a formatted message.
pub(super) fn not_found(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message }))
}
