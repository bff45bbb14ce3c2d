//! SQLite TaskRepository implementation.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{DbError, DbResult, Task, TaskDetail, TaskRepository, TaskStatus};

/// SQLx-backed task repository.
pub struct SqliteTaskRepository {
    pub(crate) pool: SqlitePool,
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> DbResult<Task> {
        let id = if task.id.is_empty() {
            generate_entity_id()
        } else {
            task.id.clone()
        };

        let created_at = current_timestamp();
        let status_str = task.status.to_string();

        sqlx::query(
            r#"
            INSERT INTO task (id, name, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&task.name)
        .bind(status_str)
        .bind(&created_at)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("Task", &id, e))?;

        Ok(Task {
            id,
            name: task.name.clone(),
            status: task.status,
            created_at: created_at.clone(),
            updated_at: created_at,
        })
    }

    async fn list(&self) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT id, name, status, created_at, updated_at
             FROM task ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn create_detail(&self, detail: &TaskDetail) -> DbResult<TaskDetail> {
        let id = if detail.id.is_empty() {
            generate_entity_id()
        } else {
            detail.id.clone()
        };

        let created_at = current_timestamp();

        sqlx::query(
            r#"
            INSERT INTO task_detail (id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&detail.name)
        .bind(&detail.description)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx("TaskDetail", &detail.name, e))?;

        Ok(TaskDetail {
            id,
            name: detail.name.clone(),
            description: detail.description.clone(),
            created_at,
        })
    }

    async fn get_detail_by_name(&self, name: &str) -> DbResult<Option<TaskDetail>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at
             FROM task_detail WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(row.map(|row| TaskDetail {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: row.get("created_at"),
        }))
    }
}

/// Convert a database row to a Task model.
fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        name: row.get("name"),
        status: {
            let status_str: String = row.get("status");
            TaskStatus::from_str(&status_str).unwrap_or_default()
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
