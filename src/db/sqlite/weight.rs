//! SQLite WeightRepository implementation.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{DbError, DbResult, WeightEntry, WeightRepository};

/// SQLx-backed weight log repository.
pub struct SqliteWeightRepository {
    pub(crate) pool: SqlitePool,
}

#[async_trait]
impl WeightRepository for SqliteWeightRepository {
    async fn create(&self, entry: &WeightEntry) -> DbResult<WeightEntry> {
        let id = if entry.id.is_empty() {
            generate_entity_id()
        } else {
            entry.id.clone()
        };

        let created_at = current_timestamp();

        // recorded_at comes from the weighbridge; default to now when
        // the caller left it empty.
        let recorded_at = if entry.recorded_at.is_empty() {
            created_at.clone()
        } else {
            entry.recorded_at.clone()
        };

        sqlx::query(
            r#"
            INSERT INTO weight_entry (id, kilograms, recorded_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(entry.kilograms)
        .bind(&recorded_at)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("WeightEntry", &id, e))?;

        Ok(WeightEntry {
            id,
            kilograms: entry.kilograms,
            recorded_at,
            created_at,
        })
    }

    async fn latest(&self) -> DbResult<Option<WeightEntry>> {
        // "Latest" is defined by the recorded_at ordering, never by
        // store insertion order.
        let row = sqlx::query(
            "SELECT id, kilograms, recorded_at, created_at
             FROM weight_entry
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(row.map(|row| WeightEntry {
            id: row.get("id"),
            kilograms: row.get("kilograms"),
            recorded_at: row.get("recorded_at"),
            created_at: row.get("created_at"),
        }))
    }
}
