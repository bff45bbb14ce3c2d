//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! business logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Car, BreakingVehicle, Task, TaskDetail,
//!   UserProfile, WeightEntry)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLite implementation over a sqlx pool

mod error;
mod models;
mod repository;
mod sqlite;
pub mod utils;

#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
