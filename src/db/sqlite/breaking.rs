//! SQLite BreakingVehicleRepository implementation.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{
    BreakingStatus, BreakingVehicle, BreakingVehicleRepository, BreakingVehicleWithCar, Car,
    DbError, DbResult,
};

/// SQLx-backed breaking vehicle repository.
pub struct SqliteBreakingVehicleRepository {
    pub(crate) pool: SqlitePool,
}

#[async_trait]
impl BreakingVehicleRepository for SqliteBreakingVehicleRepository {
    async fn create(&self, vehicle: &BreakingVehicle) -> DbResult<BreakingVehicle> {
        // The referenced car must exist; report its absence as NotFound
        // rather than a raw constraint failure.
        let car_exists = sqlx::query("SELECT id FROM car WHERE id = ?")
            .bind(&vehicle.car_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        if car_exists.is_none() {
            return Err(DbError::NotFound {
                entity_type: "Car".to_string(),
                key: vehicle.car_id.clone(),
            });
        }

        let id = if vehicle.id.is_empty() {
            generate_entity_id()
        } else {
            vehicle.id.clone()
        };

        let created_at = current_timestamp();
        let status_str = vehicle.status.to_string();

        sqlx::query(
            r#"
            INSERT INTO breaking_vehicle (id, car_id, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&vehicle.car_id)
        .bind(status_str)
        .bind(&vehicle.notes)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("BreakingVehicle", &id, e))?;

        Ok(BreakingVehicle {
            id,
            car_id: vehicle.car_id.clone(),
            status: vehicle.status,
            notes: vehicle.notes.clone(),
            created_at,
        })
    }

    async fn list_with_cars(&self) -> DbResult<Vec<BreakingVehicleWithCar>> {
        let rows = sqlx::query(
            r#"
            SELECT bv.id, bv.car_id, bv.status, bv.notes, bv.created_at,
                   c.id AS c_id, c.reg AS c_reg, c.make AS c_make, c.model AS c_model,
                   c.paint_code AS c_paint_code, c.created_at AS c_created_at,
                   c.updated_at AS c_updated_at
            FROM breaking_vehicle bv
            JOIN car c ON c.id = bv.car_id
            ORDER BY bv.created_at DESC, bv.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(rows.iter().map(row_to_vehicle_with_car).collect())
    }
}

/// Convert a joined row to a BreakingVehicleWithCar.
fn row_to_vehicle_with_car(row: &sqlx::sqlite::SqliteRow) -> BreakingVehicleWithCar {
    BreakingVehicleWithCar {
        vehicle: BreakingVehicle {
            id: row.get("id"),
            car_id: row.get("car_id"),
            status: {
                let status_str: String = row.get("status");
                BreakingStatus::from_str(&status_str).unwrap_or_default()
            },
            notes: row.get("notes"),
            created_at: row.get("created_at"),
        },
        car: Car {
            id: row.get("c_id"),
            reg: row.get("c_reg"),
            make: row.get("c_make"),
            model: row.get("c_model"),
            paint_code: row.get("c_paint_code"),
            created_at: row.get("c_created_at"),
            updated_at: row.get("c_updated_at"),
        },
    }
}
