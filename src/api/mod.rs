//! HTTP API server.

mod gate;
pub mod notifier;
mod routes;
mod state;
mod system;
mod upload;
pub mod v1;
mod websocket;

#[cfg(test)]
mod notifier_test;
#[cfg(test)]
mod upload_test;

use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::IdentityResolver;
use crate::db::Database;

pub use gate::PublicRoutes;
pub use notifier::ChangeNotifier;
pub use state::AppState;
pub use upload::UploadProxy;

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Paths exempt from identity enforcement
    pub public_routes: PublicRoutes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".parse().unwrap(),
            port: 3000,
            public_routes: PublicRoutes::default(),
        }
    }
}

/// Errors surfaced while starting or running the API server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(breakyard::api::io))]
    Io(#[from] std::io::Error),
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breakyard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration.
///
/// The concrete database and identity resolver are injected by the
/// binary; the API layer stays agnostic of both.
pub async fn run<D, I>(config: Config, db: D, resolver: I) -> Result<(), ApiError>
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    init_tracing();

    let state = AppState::new(
        db,
        resolver,
        ChangeNotifier::new(),
        UploadProxy::from_env(),
        config.public_routes,
    );
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
