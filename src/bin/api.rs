//! breakyard API server binary.
//!
//! This binary creates the concrete database implementation and the
//! identity resolver and passes them to the API server. The API layer
//! remains agnostic of both.

use std::net::IpAddr;
use std::path::PathBuf;

use breakyard::api::{self, ApiError, Config, PublicRoutes};
use breakyard::auth::{ClerkConfig, ClerkIdentityResolver};
use breakyard::db::{Database, DbError, SqliteDatabase};
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(breakyard::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(breakyard::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(breakyard::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "breakyard-api")]
#[command(author, version, about = "breakyard API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Database file path
    #[arg(long, default_value = "breakyard.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    println!("Opening database at {:?}", cli.db);

    // Ensure parent directory exists
    if let Some(parent) = cli.db.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&cli.db).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    // Identity provider configuration comes from the environment
    let resolver = ClerkIdentityResolver::new(ClerkConfig::from_env());

    // Pass the abstract Database and resolver to the API layer
    api::run(
        Config {
            host: cli.host,
            port: cli.port,
            public_routes: PublicRoutes::default(),
        },
        db,
        resolver,
    )
    .await?;

    Ok(())
}
