//! User profile handlers.
//!
//! The resolved identity is an explicit input: the gate middleware
//! inserts it into request extensions and the handler passes the
//! subject id straight into the repository call.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::{Identity, IdentityResolver};
use crate::db::{Database, UserProfile};

use super::{ErrorResponse, not_found, store_fault};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "abc123")]
    pub clerk_id: String,
    #[schema(example = "ops@yard.example")]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

impl From<UserProfile> for UserResponse {
    fn from(u: UserProfile) -> Self {
        Self {
            id: u.id,
            clerk_id: u.clerk_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
        }
    }
}

/// Current user profile, scoped by the resolved identity.
#[utoipa::path(
    get,
    path = "/v1/me",
    tag = "users",
    responses(
        (status = 200, description = "Profile for the resolved identity", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "No profile for this identity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn me<D, I>(
    State(state): State<AppState<D, I>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserResponse>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let user = state
        .db()
        .users()
        .find_by_clerk_id(&identity.subject)
        .await
        .map_err(store_fault)?;

    let user = user.ok_or_else(|| {
        not_found(format!("No profile for subject '{}'", identity.subject))
    })?;

    Ok(Json(UserResponse::from(user)))
}
