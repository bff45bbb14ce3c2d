//! Integration tests for weight log API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, ChangeNotifier, PublicRoutes, UploadProxy, routes};
use crate::auth::StaticIdentityResolver;
use crate::db::{Database, SqliteDatabase};

async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState::new(
        db,
        StaticIdentityResolver::resolving("abc123"),
        ChangeNotifier::new(),
        UploadProxy::new("http://127.0.0.1:1"),
        PublicRoutes::default(),
    );
    routes::create_router(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn record_weight(app: &axum::Router, kilograms: f64, recorded_at: &str) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/weights")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(
                        &json!({"kilograms": kilograms, "recorded_at": recorded_at}),
                    )
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_on_empty_log_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/weights/latest")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_is_newest_by_recorded_at() {
    let app = test_app().await;

    // Newest reading recorded first; ordering must come from the
    // timestamp, not from insertion order.
    record_weight(&app, 1180.5, "2026-03-02 08:30:00").await;
    record_weight(&app, 990.0, "2026-03-01 08:30:00").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/weights/latest")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["recorded_at"], "2026-03-02 08:30:00");
    assert_eq!(body["kilograms"], 1180.5);
}

#[tokio::test(flavor = "multi_thread")]
async fn record_weight_returns_created() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/weights")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"kilograms": 1050.0})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["kilograms"], 1050.0);
    assert!(!body["recorded_at"].as_str().unwrap().is_empty());
}
