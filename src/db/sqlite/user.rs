//! SQLite UserRepository implementation.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{DbError, DbResult, UserProfile, UserRepository};

/// SQLx-backed user profile repository.
pub struct SqliteUserRepository {
    pub(crate) pool: SqlitePool,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &UserProfile) -> DbResult<UserProfile> {
        let id = if user.id.is_empty() {
            generate_entity_id()
        } else {
            user.id.clone()
        };

        let created_at = current_timestamp();

        sqlx::query(
            r#"
            INSERT INTO user_profile (id, clerk_id, email, first_name, last_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.clerk_id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("UserProfile", &user.clerk_id, e))?;

        Ok(UserProfile {
            id,
            clerk_id: user.clerk_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at,
        })
    }

    async fn find_by_clerk_id(&self, clerk_id: &str) -> DbResult<Option<UserProfile>> {
        let row = sqlx::query(
            "SELECT id, clerk_id, email, first_name, last_name, created_at
             FROM user_profile WHERE clerk_id = ? LIMIT 1",
        )
        .bind(clerk_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(row.map(|row| UserProfile {
            id: row.get("id"),
            clerk_id: row.get("clerk_id"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: row.get("created_at"),
        }))
    }
}
