//! Task handlers.
//!
//! The bulk task listing marks the tasks page's cached data stale:
//! every call emits exactly one `TasksRefreshed` signal after the
//! read completes.

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
use crate::db::{Database, DbError, Task, TaskDetail, TaskStatus};

use super::{ErrorResponse, not_found, store_fault};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Strip engine bay")]
    pub name: String,
    #[schema(example = "open")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            name: t.name,
            status: t.status.to_string(),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[schema(example = "Strip engine bay")]
    pub name: String,
    #[schema(example = "open")]
    pub status: Option<String>,
}

/// Only the description travels back from a detail lookup.
#[derive(Serialize, ToSchema)]
pub struct TaskDetailResponse {
    #[schema(example = "Remove ancillaries before lifting the block")]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskDetailRequest {
    #[schema(example = "Strip engine bay")]
    pub name: String,
    #[schema(example = "Remove ancillaries before lifting the block")]
    pub description: String,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks", body = [TaskResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_tasks<D, I>(
    State(state): State<AppState<D, I>>,
) -> Result<Json<Vec<TaskResponse>>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let tasks = state.db().tasks().list().await.map_err(store_fault)?;

    // One staleness hint per successful read, after the data is in hand.
    state.notifier().notify(UpdateMessage::TasksRefreshed);

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task<D, I>(
    State(state): State<AppState<D, I>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let status = req
        .status
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(TaskStatus::Open);

    let task = Task {
        id: String::new(), // Repository will generate this
        name: req.name,
        status,
        created_at: String::new(),
        updated_at: String::new(),
    };

    let created = state.db().tasks().create(&task).await.map_err(store_fault)?;

    state.notifier().notify(UpdateMessage::TaskCreated {
        task_id: created.id.clone(),
    });

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/v1/task-details/{name}",
    tag = "tasks",
    params(("name" = String, Path, description = "Task detail name")),
    responses(
        (status = 200, description = "Detail found", body = TaskDetailResponse),
        (status = 404, description = "No detail with that name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_task_detail<D, I>(
    State(state): State<AppState<D, I>>,
    Path(name): Path<String>,
) -> Result<Json<TaskDetailResponse>, (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let detail = state
        .db()
        .tasks()
        .get_detail_by_name(&name)
        .await
        .map_err(store_fault)?;

    let detail = detail.ok_or_else(|| not_found(format!("Task detail '{}' not found", name)))?;

    Ok(Json(TaskDetailResponse {
        description: detail.description,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/task-details",
    tag = "tasks",
    request_body = CreateTaskDetailRequest,
    responses(
        (status = 201, description = "Detail created", body = TaskDetailResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task_detail<D, I>(
    State(state): State<AppState<D, I>>,
    Json(req): Json<CreateTaskDetailRequest>,
) -> Result<(StatusCode, Json<TaskDetailResponse>), (StatusCode, Json<ErrorResponse>)>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let detail = TaskDetail {
        id: String::new(), // Repository will generate this
        name: req.name,
        description: req.description,
        created_at: String::new(),
    };

    let created = state
        .db()
        .tasks()
        .create_detail(&detail)
        .await
        .map_err(|e| match e {
            DbError::AlreadyExists { .. } => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ),
            _ => store_fault(e),
        })?;

    state.notifier().notify(UpdateMessage::TaskDetailCreated {
        detail_id: created.id.clone(),
    });

    Ok((
        StatusCode::CREATED,
        Json(TaskDetailResponse {
            description: created.description,
        }),
    ))
}
