//! Upload callback pass-through.
//!
//! The upload router is an external service; this application defines
//! no request or response shape of its own for it. The handler
//! forwards the callback verbatim and relays whatever comes back.

use std::env;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use tracing::{instrument, warn};

use super::state::AppState;
use super::v1::ErrorResponse;
use crate::auth::IdentityResolver;
use crate::db::Database;

const DEFAULT_UPLOAD_URL: &str = "https://uploadthing.com/api";
const MAX_CALLBACK_BYTES: usize = 2 * 1024 * 1024;

/// Client for the external upload router.
#[derive(Clone)]
pub struct UploadProxy {
    http: reqwest::Client,
    base_url: String,
}

impl UploadProxy {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a proxy from the environment (UPLOADTHING_URL), falling
    /// back to the provider default.
    pub fn from_env() -> Self {
        let base_url =
            env::var("UPLOADTHING_URL").unwrap_or_else(|_| DEFAULT_UPLOAD_URL.to_string());
        Self::new(base_url)
    }

    /// Base URL of the upstream upload router.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a callback request to the upload router and relay its
    /// response.
    async fn forward(&self, parts: &Parts, body: Bytes) -> Result<Response, reqwest::Error> {
        let suffix = parts
            .uri
            .path()
            .strip_prefix("/api/uploadthing")
            .unwrap_or("");

        let mut url = format!("{}{}", self.base_url, suffix);
        if let Some(query) = parts.uri.query() {
            url.push('?');
            url.push_str(query);
        }

        // Only GET and POST are routed here.
        let method = if parts.method == Method::POST {
            reqwest::Method::POST
        } else {
            reqwest::Method::GET
        };

        let mut upstream_req = self.http.request(method, &url).body(body.to_vec());
        if let Some(content_type) = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            upstream_req = upstream_req.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let upstream = upstream_req.send().await?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = upstream
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = upstream.bytes().await?;

        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        Ok(builder
            .body(Body::from(bytes.to_vec()))
            .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response()))
    }
}

/// Upload callback route pair (GET/POST).
#[instrument(skip(state, request))]
pub async fn uploadthing_callback<D, I>(
    State(state): State<AppState<D, I>>,
    request: Request,
) -> Response
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_CALLBACK_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("unreadable upload callback body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "unreadable request body".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.uploads().forward(&parts, bytes).await {
        Ok(response) => response,
        Err(e) => {
            warn!("upload router unreachable: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "upload router unreachable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
