//! Application state for the API server.

use std::sync::Arc;

use super::gate::PublicRoutes;
use super::notifier::ChangeNotifier;
use super::upload::UploadProxy;
use crate::auth::IdentityResolver;
use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` and `I: IdentityResolver` so production
/// wiring (SQLite, Clerk) and tests (in-memory, static identity) use
/// the same handlers. Dependencies are injected via the constructor,
/// not created internally.
pub struct AppState<D: Database, I: IdentityResolver> {
    db: Arc<D>,
    resolver: Arc<I>,
    notifier: ChangeNotifier,
    uploads: UploadProxy,
    public_routes: Arc<PublicRoutes>,
}

// Manual Clone impl - we only need the Arcs to be cloneable, not D or I
impl<D: Database, I: IdentityResolver> Clone for AppState<D, I> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            resolver: Arc::clone(&self.resolver),
            notifier: self.notifier.clone(),
            uploads: self.uploads.clone(),
            public_routes: Arc::clone(&self.public_routes),
        }
    }
}

impl<D: Database, I: IdentityResolver> AppState<D, I> {
    /// Create a new AppState with the given dependencies.
    pub fn new(
        db: D,
        resolver: I,
        notifier: ChangeNotifier,
        uploads: UploadProxy,
        public_routes: PublicRoutes,
    ) -> Self {
        Self {
            db: Arc::new(db),
            resolver: Arc::new(resolver),
            notifier,
            uploads,
            public_routes: Arc::new(public_routes),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the identity resolver.
    pub fn resolver(&self) -> &I {
        &self.resolver
    }

    /// Get a reference to the change notifier.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Get a reference to the upload proxy.
    pub fn uploads(&self) -> &UploadProxy {
        &self.uploads
    }

    /// Get the public-route allowlist.
    pub fn public_routes(&self) -> &PublicRoutes {
        &self.public_routes
    }
}
