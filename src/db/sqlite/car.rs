//! SQLite CarRepository implementation.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{Car, CarRepository, DbError, DbResult};

/// SQLx-backed car repository.
pub struct SqliteCarRepository {
    pub(crate) pool: SqlitePool,
}

#[async_trait]
impl CarRepository for SqliteCarRepository {
    async fn create(&self, car: &Car) -> DbResult<Car> {
        // Use provided ID if not empty, otherwise generate one
        let id = if car.id.is_empty() {
            generate_entity_id()
        } else {
            car.id.clone()
        };

        let created_at = current_timestamp();

        sqlx::query(
            r#"
            INSERT INTO car (id, reg, make, model, paint_code, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&car.reg)
        .bind(&car.make)
        .bind(&car.model)
        .bind(&car.paint_code)
        .bind(&created_at)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("Car", &car.reg, e))?;

        Ok(Car {
            id,
            reg: car.reg.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            paint_code: car.paint_code.clone(),
            created_at: created_at.clone(),
            updated_at: created_at,
        })
    }

    async fn get_by_reg(&self, reg: &str) -> DbResult<Car> {
        let row = sqlx::query(
            "SELECT id, reg, make, model, paint_code, created_at, updated_at
             FROM car WHERE reg = ?",
        )
        .bind(reg)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "Car".to_string(),
            key: reg.to_string(),
        })?;

        Ok(row_to_car(&row))
    }

    async fn list(&self) -> DbResult<Vec<Car>> {
        let rows = sqlx::query(
            "SELECT id, reg, make, model, paint_code, created_at, updated_at
             FROM car ORDER BY reg",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(rows.iter().map(row_to_car).collect())
    }

    async fn update_paint_code(&self, reg: &str, paint_code: Option<&str>) -> DbResult<Car> {
        let result = sqlx::query("UPDATE car SET paint_code = ?, updated_at = ? WHERE reg = ?")
            .bind(paint_code)
            .bind(current_timestamp())
            .bind(reg)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "Car".to_string(),
                key: reg.to_string(),
            });
        }

        self.get_by_reg(reg).await
    }
}

/// Convert a database row to a Car model.
fn row_to_car(row: &sqlx::sqlite::SqliteRow) -> Car {
    Car {
        id: row.get("id"),
        reg: row.get("reg"),
        make: row.get("make"),
        model: row.get("model"),
        paint_code: row.get("paint_code"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
