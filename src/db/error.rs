//! Database error types.
//!
//! Storage-backend agnostic error types for the repository layer.
//! Uses miette for diagnostic output and thiserror for derive macros.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with key '{key}'")]
    #[diagnostic(code(breakyard::db::not_found))]
    NotFound { entity_type: String, key: String },

    #[error("Entity already exists: {entity_type} with key '{key}'")]
    #[diagnostic(code(breakyard::db::already_exists))]
    AlreadyExists { entity_type: String, key: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(breakyard::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(breakyard::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(breakyard::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    /// Map a sqlx error, turning unique-key violations on the given
    /// entity into `AlreadyExists`.
    pub fn from_sqlx(entity_type: &str, key: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return DbError::AlreadyExists {
                entity_type: entity_type.to_string(),
                key: key.to_string(),
            };
        }
        DbError::Database {
            message: err.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
