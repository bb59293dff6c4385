//! Repository for the `categories` table.

use mytasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory};

const COLUMNS: &str = "id, name, description, created_at";

/// Provides data access for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by exact name.
    ///
    /// Callers use this as the duplicate check before [`Self::create`]; the
    /// two statements are not atomic.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1 LIMIT 1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All categories, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Permanently delete a category. Returns `true` if a row was removed.
    ///
    /// Tasks referencing it keep their `category_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
