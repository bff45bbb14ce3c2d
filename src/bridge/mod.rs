//! Legacy database bridge.
//!
//! A standalone process keeps a pooled connection open to the legacy
//! yard database, identified by a DSN string and reached through the
//! generic `sqlx::Any` driver. The primary relational store is not
//! involved; consumers of the bridge are external to this crate.

use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool};
use tracing::info;

use crate::db::{DbError, DbResult};


/// Pooled connection to the legacy data source.
pub struct LegacyBridge {
    pool: AnyPool,
}

impl LegacyBridge {
    /// Open a pool against the legacy DSN and check out one connection
    /// to validate it.
    pub async fn connect(dsn: &str, max_connections: u32) -> DbResult<Self> {
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(dsn)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        // Validate the pool up front; the connection returns to the
        // pool on drop.
        let conn = pool.acquire().await.map_err(|e| DbError::Connection {
            message: e.to_string(),
        })?;
        drop(conn);

        info!(max_connections, "legacy bridge pool established");

        Ok(Self { pool })
    }

    /// Check out a connection. It returns to the pool when dropped.
    pub async fn checkout(&self) -> DbResult<PoolConnection<Any>> {
        self.pool.acquire().await.map_err(|e| DbError::Connection {
            message: e.to_string(),
        })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}
