//! Repository for the `tasks` table.
//!
//! Every statement is scoped to the owning user and to live rows
//! (`deleted_at IS NULL`); another user's task is indistinguishable from a
//! missing one.

use chrono::NaiveDate;
use mytasks_core::task::DueDateChange;
use mytasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskListFilter, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str = "\
    id, user_id, category_id, parent_id, title, description, status, \
    priority, due_date, created_at, updated_at";

/// Provides data access for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (user_id, category_id, parent_id, title, description, status, priority, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(input.category_id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a live task owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a live task with this id belongs to `user_id`.
    pub async fn exists(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM tasks \
                 WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List the user's live tasks matching `filter`, newest first.
    ///
    /// A row that fails to decode fails the whole call.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskListFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_task_filter(user_id, filter);

        let query = format!(
            "SELECT {COLUMNS} FROM tasks {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_task_values(sqlx::query_as::<_, Task>(&query), &bind_values);
        q.bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(pool)
            .await
    }

    /// Count the user's live tasks matching `filter`, ignoring pagination.
    pub async fn count(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskListFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_task_filter(user_id, filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM tasks {where_clause}");

        let q = bind_task_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Partially update a live task owned by `user_id`.
    ///
    /// Uses `COALESCE` so only provided fields change; `due_date` can also
    /// be cleared, and an empty `description` clears it to `NULL`. `updated_at` is always refreshed. Returns `None` when no
    /// live row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let (clear_due_date, new_due_date): (bool, Option<NaiveDate>) = match input.due_date {
            DueDateChange::Keep => (false, None),
            DueDateChange::Clear => (true, None),
            DueDateChange::Set(date) => (false, Some(date)),
        };

        let query = format!(
            "UPDATE tasks SET \
                 title       = COALESCE($3, title), \
                 description = CASE WHEN $4::TEXT IS NULL THEN description ELSE NULLIF($4, '') END, \
                 category_id = COALESCE($5, category_id), \
                 parent_id   = COALESCE($6, parent_id), \
                 status      = COALESCE($7, status), \
                 priority    = COALESCE($8, priority), \
                 due_date    = CASE WHEN $9 THEN NULL ELSE COALESCE($10, due_date) END, \
                 updated_at  = NOW() \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.parent_id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority)
            .bind(clear_due_date)
            .bind(new_due_date)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a live task owned by `user_id`.
    ///
    /// Returns `true` if a row was marked. A second call returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built task queries.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BindValue {
    BigInt(i64),
    Text(String),
    Date(NaiveDate),
}

/// Build the WHERE clause and bind values for a task listing.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// starts with the owner and live-row constraints; each populated filter
/// adds one `AND` term with its own placeholder.
fn build_task_filter(user_id: DbId, filter: &TaskListFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["user_id = $1".into(), "deleted_at IS NULL".into()];
    let mut bind_idx = 2u32;
    let mut bind_values: Vec<BindValue> = vec![BindValue::BigInt(user_id)];

    if let Some(status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.as_str().to_string()));
    }

    if let Some(category_id) = filter.category_id {
        conditions.push(format!("category_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(category_id));
    }

    if let Some(ref pattern) = filter.search {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(pattern.clone()));
    }

    if let Some(before) = filter.due_before {
        conditions.push(format!("due_date <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(before));
    }

    if let Some(after) = filter.due_after {
        conditions.push(format!("due_date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(after));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_task_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_task_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
