//! Integration tests for car API endpoints.

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

/// Helper to create a car and return its registration.
async fn create_car(app: &axum::Router, reg: &str) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/cars")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"reg": reg, "make": "Ford", "model": "Focus"}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_car_returns_created() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/cars")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "reg": "AB12CDE",
                        "make": "Ford",
                        "model": "Focus",
                        "paint_code": "PN4CV"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["reg"], "AB12CDE");
    assert_eq!(body["paint_code"], "PN4CV");
    assert_eq!(body["id"].as_str().unwrap().len(), 8);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_reg_is_conflict() {
    let app = test_app().await;
    create_car(&app, "AB12CDE").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/cars")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"reg": "AB12CDE"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn patch_unknown_reg_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/cars/ZZ99ZZZ")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"paint_code": "PN4CV"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("ZZ99ZZZ"));
}

#[tokio::test(flavor = "multi_thread")]
async fn patch_then_get_returns_new_paint_code() {
    let app = test_app().await;
    create_car(&app, "AB12CDE").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/cars/AB12CDE")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"paint_code": "PN4CV"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/cars/AB12CDE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["paint_code"], "PN4CV");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_cars_returns_all() {
    let app = test_app().await;
    create_car(&app, "AB12CDE").await;
    create_car(&app, "CD34EFG").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/cars")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
