//! Edge gate: public-route allowlist and identity enforcement.
//!
//! A fixed set of path patterns (webhooks, upload callbacks, auth
//! pages) bypasses identity resolution; every other path requires a
//! resolved identity before it reaches a handler. The resolved
//! identity is inserted into request extensions so handlers receive
//! it as an explicit input.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::state::AppState;
use super::v1::ErrorResponse;
use crate::auth::IdentityResolver;
use crate::db::Database;

/// Allowlist of paths exempt from identity enforcement.
///
/// A pattern is either an exact path or a prefix ending in `/*`.
#[derive(Debug, Clone)]
pub struct PublicRoutes {
    patterns: Vec<String>,
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new(vec![
            "/".to_string(),
            "/health".to_string(),
            "/docs".to_string(),
            "/docs/*".to_string(),
            "/sign-in/*".to_string(),
            "/sign-up/*".to_string(),
            "/api/uploadthing/*".to_string(),
            "/api/revoke-sessions".to_string(),
            "/api/dailychecks".to_string(),
        ])
    }
}

impl PublicRoutes {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Whether the path matches any public pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            match pattern.strip_suffix("/*") {
                Some(prefix) => path == prefix || path.starts_with(&format!("{}/", prefix)),
                None => path == pattern,
            }
        })
    }
}

/// Middleware enforcing the public-route policy.
///
/// Public paths pass through untouched. All other paths require the
/// resolver to produce an identity; unauthenticated requests are
/// rejected with 401 before any handler runs.
pub async fn require_identity<D, I>(
    State(state): State<AppState<D, I>>,
    mut request: Request,
    next: Next,
) -> Response
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    let path = request.uri().path().to_string();

    if state.public_routes().matches(&path) {
        return next.run(request).await;
    }

    match state.resolver().resolve(request.headers()).await {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => {
            debug!("unauthenticated request to {}", path);
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "authentication required".to_string(),
                }),
            )
                .into_response()
        }
    }
}
