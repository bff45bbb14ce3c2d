//! Identity resolution against the external identity provider.
//!
//! The resolver contract is deliberately infallible: absence of
//! identity is a normal, representable outcome, so provider faults
//! are logged and collapse to `None` rather than surfacing as errors.

mod clerk;


use async_trait::async_trait;
use axum::http::HeaderMap;

pub use clerk::{ClerkConfig, ClerkIdentityResolver};

/// A resolved external identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque subject identifier assigned by the identity provider.
    pub subject: String,
}

/// Maps inbound request headers to an external identity, or `None`.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the identity carried by the request, if any.
    async fn resolve(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Resolver with a fixed outcome. Used by tests and local development
/// where no identity provider is reachable.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    identity: Option<Identity>,
}

impl StaticIdentityResolver {
    /// Resolver that always resolves the given subject.
    pub fn resolving(subject: &str) -> Self {
        Self {
            identity: Some(Identity {
                subject: subject.to_string(),
            }),
        }
    }

    /// Resolver that never resolves an identity.
    pub fn unauthenticated() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, _headers: &HeaderMap) -> Option<Identity> {
        self.identity.clone()
    }
}
