//! API route configuration.

use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1::{
    self, BreakingVehicleCreatedResponse, BreakingVehicleResponse, CarResponse,
    CreateBreakingVehicleRequest, CreateCarRequest, CreateTaskDetailRequest, CreateTaskRequest,
    ErrorResponse, RecordWeightRequest, TaskDetailResponse, TaskResponse, UpdateCarPaintRequest,
    UserResponse, WeightResponse,
};
use super::{gate, system, upload, websocket};
use crate::auth::IdentityResolver;
use crate::db::Database;

/// Build routes with generic database and resolver types.
///
/// This macro reduces boilerplate when registering handlers that are
/// generic over the Database and IdentityResolver traits. It applies
/// the turbofish operator automatically.
macro_rules! routes {
    ($D:ty, $I:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D, $I>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "breakyard API",
        version = "0.3.0",
        description = "Vehicle dismantling yard management API",
        license(name = "MIT")
    ),
    paths(
        system::root,
        system::health,
        system::dailychecks,
        system::revoke_sessions,
        v1::list_cars,
        v1::get_car,
        v1::create_car,
        v1::update_car_paint,
        v1::list_breaking_vehicles,
        v1::create_breaking_vehicle,
        v1::list_tasks,
        v1::create_task,
        v1::get_task_detail,
        v1::create_task_detail,
        v1::me,
        v1::latest_weight,
        v1::record_weight,
    ),
    components(
        schemas(
            system::HealthResponse,
            CarResponse,
            CreateCarRequest,
            UpdateCarPaintRequest,
            BreakingVehicleResponse,
            BreakingVehicleCreatedResponse,
            CreateBreakingVehicleRequest,
            TaskResponse,
            CreateTaskRequest,
            TaskDetailResponse,
            CreateTaskDetailRequest,
            UserResponse,
            WeightResponse,
            RecordWeightRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and public webhook endpoints"),
        (name = "cars", description = "Car management endpoints"),
        (name = "breaking-vehicles", description = "Breaking vehicle endpoints"),
        (name = "tasks", description = "Task and task detail endpoints"),
        (name = "users", description = "User profile endpoints"),
        (name = "weights", description = "Weight log endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation.
///
/// The edge gate wraps every route; the public allowlist carried in
/// the state decides which paths skip identity enforcement.
pub fn create_router<D, I>(state: AppState<D, I>) -> Router
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let api = ApiDoc::openapi();

    // System and public webhook routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/dailychecks", get(system::dailychecks))
        .route("/api/revoke-sessions", post(system::revoke_sessions));

    // Upload callback pass-through (GET/POST route pair)
    let upload_routes = Router::new()
        .route(
            "/api/uploadthing",
            get(upload::uploadthing_callback::<D, I>).post(upload::uploadthing_callback::<D, I>),
        )
        .route(
            "/api/uploadthing/{*rest}",
            get(upload::uploadthing_callback::<D, I>).post(upload::uploadthing_callback::<D, I>),
        );

    let car_routes = routes!(D, I => {
        get "/v1/cars" => v1::list_cars,
        post "/v1/cars" => v1::create_car,
        get "/v1/cars/{reg}" => v1::get_car,
        patch "/v1/cars/{reg}" => v1::update_car_paint,
    });

    let breaking_routes = routes!(D, I => {
        get "/v1/breaking-vehicles" => v1::list_breaking_vehicles,
        post "/v1/breaking-vehicles" => v1::create_breaking_vehicle,
    });

    let task_routes = routes!(D, I => {
        get "/v1/tasks" => v1::list_tasks,
        post "/v1/tasks" => v1::create_task,
        get "/v1/task-details/{name}" => v1::get_task_detail,
        post "/v1/task-details" => v1::create_task_detail,
    });

    let user_routes = routes!(D, I => {
        get "/v1/me" => v1::me,
    });

    let weight_routes = routes!(D, I => {
        get "/v1/weights/latest" => v1::latest_weight,
        post "/v1/weights" => v1::record_weight,
    });

    let ws_routes = Router::new().route("/ws", get(websocket::ws_handler::<D, I>));

    system_routes
        .merge(upload_routes)
        .merge(car_routes)
        .merge(breaking_routes)
        .merge(task_routes)
        .merge(user_routes)
        .merge(weight_routes)
        .merge(ws_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_identity::<D, I>,
        ))
        .with_state(state)
}
