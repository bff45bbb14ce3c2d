//! Clerk-backed identity resolver.
//!
//! Verifies the request's session token against the provider's HTTP
//! API. The provider owns all session/token mechanics; this client
//! only forwards the token and reads back the subject id.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Identity, IdentityResolver};

const DEFAULT_API_URL: &str = "https://api.clerk.com";
const SESSION_COOKIE: &str = "__session";

/// Configuration for the Clerk client.
///
/// Precedence: builder > environment > default.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// Base URL of the provider API.
    pub api_url: String,
    /// Secret API key used to authenticate verification calls.
    pub secret_key: String,
    /// Timeout applied to verification requests.
    pub timeout: Duration,
}

impl Default for ClerkConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            secret_key: String::new(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl ClerkConfig {
    /// Build a config from the environment (CLERK_API_URL,
    /// CLERK_SECRET_KEY), falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("CLERK_API_URL") {
            config.api_url = url;
        }
        if let Ok(key) = env::var("CLERK_SECRET_KEY") {
            config.secret_key = key;
        }
        config
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = secret_key.into();
        self
    }
}

/// Identity resolver backed by the Clerk session-verification API.
#[derive(Clone)]
pub struct ClerkIdentityResolver {
    config: ClerkConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct VerifyResponse {
    user_id: String,
}

impl ClerkIdentityResolver {
    pub fn new(config: ClerkConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    async fn verify(&self, token: &str) -> Option<Identity> {
        if self.config.secret_key.is_empty() {
            warn!("identity provider secret key is not configured");
            return None;
        }

        let url = format!("{}/v1/sessions/verify", self.config.api_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("identity provider unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("session verification rejected: {}", response.status());
            return None;
        }

        match response.json::<VerifyResponse>().await {
            Ok(verified) => Some(Identity {
                subject: verified.user_id,
            }),
            Err(e) => {
                warn!("malformed verification response: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl IdentityResolver for ClerkIdentityResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = session_token(headers)?;
        self.verify(&token).await
    }
}

/// Extract the session token from the Authorization header, falling
/// back to the provider's session cookie.
pub(super) fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(authz) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let token = authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = token {
            return Some(token.to_string());
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_value)
}

/// Pull the session cookie value out of a Cookie header.
fn cookie_value(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}
