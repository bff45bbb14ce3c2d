//! SQLite database connection and migration management.

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::{
    SqliteBreakingVehicleRepository, SqliteCarRepository, SqliteTaskRepository,
    SqliteUserRepository, SqliteWeightRepository,
};
use crate::db::{
    BreakingVehicleRepository, CarRepository, Database, DbError, DbResult, TaskRepository,
    UserRepository, WeightRepository,
};

// Embed migrations from migrations/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite database implementation backed by a sqlx connection pool.
pub struct SqliteDatabase {
    pool: SqlitePool,
    cars: SqliteCarRepository,
    breaking_vehicles: SqliteBreakingVehicleRepository,
    tasks: SqliteTaskRepository,
    users: SqliteUserRepository,
    weights: SqliteWeightRepository,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if needed.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self::from_pool(pool))
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool is capped at a single connection; each SQLite memory
    /// database is private to the connection that opened it.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            cars: SqliteCarRepository { pool: pool.clone() },
            breaking_vehicles: SqliteBreakingVehicleRepository { pool: pool.clone() },
            tasks: SqliteTaskRepository { pool: pool.clone() },
            users: SqliteUserRepository { pool: pool.clone() },
            weights: SqliteWeightRepository { pool: pool.clone() },
            pool,
        }
    }

    /// Access the underlying pool. Useful for tests and advanced
    /// operations that need direct database access.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn breaking_vehicles(&self) -> &dyn BreakingVehicleRepository {
        &self.breaking_vehicles
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn weights(&self) -> &dyn WeightRepository {
        &self.weights
    }
}
