//! Tests for the upload callback pass-through.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serial_test::serial;
use tower::ServiceExt;

use crate::api::{AppState, ChangeNotifier, PublicRoutes, UploadProxy, routes};
use crate::auth::StaticIdentityResolver;
use crate::db::{Database, SqliteDatabase};

async fn test_app(uploads: UploadProxy) -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState::new(
        db,
        StaticIdentityResolver::unauthenticated(),
        ChangeNotifier::new(),
        uploads,
        PublicRoutes::default(),
    );
    routes::create_router(state)
}

#[test]
#[serial]
fn proxy_from_env_reads_variable() {
    unsafe {
        std::env::set_var("UPLOADTHING_URL", "http://localhost:9300/api");
    }

    let proxy = UploadProxy::from_env();
    assert_eq!(proxy.base_url(), "http://localhost:9300/api");

    unsafe {
        std::env::remove_var("UPLOADTHING_URL");
    }
}

#[test]
#[serial]
fn proxy_from_env_defaults_to_provider() {
    unsafe {
        std::env::remove_var("UPLOADTHING_URL");
    }

    let proxy = UploadProxy::from_env();
    assert_eq!(proxy.base_url(), "https://uploadthing.com/api");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_upstream_is_bad_gateway() {
    let app = test_app(UploadProxy::new("http://127.0.0.1:1")).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/uploadthing/callback")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_route_pair_is_registered() {
    let app = test_app(UploadProxy::new("http://127.0.0.1:1")).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/uploadthing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Unreachable upstream, but the route exists and is public.
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
