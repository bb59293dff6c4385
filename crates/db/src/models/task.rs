//! Tasks and the list filter.

use chrono::NaiveDate;
use mytasks_core::pagination::Pagination;
use mytasks_core::task::{DueDateChange, TaskStatus};
use mytasks_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A live row from the `tasks` table.
///
/// `deleted_at` is not selected: soft-deleted rows never leave the repository.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DbId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Write inputs (validated by the caller)
// ---------------------------------------------------------------------------

/// Insert payload for a new task. The owner is passed separately.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    pub status: TaskStatus,
    pub priority: i32,
    pub due_date: Option<NaiveDate>,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<i32>,
    pub due_date: DueDateChange,
}

// ---------------------------------------------------------------------------
// Query filter
// ---------------------------------------------------------------------------

/// Optional constraints for [`TaskRepo::list`](crate::repositories::TaskRepo::list).
///
/// `search` holds a ready-made `ILIKE` pattern (see
/// [`mytasks_core::task::search_pattern`]).
#[derive(Debug, Clone, Default)]
pub struct TaskListFilter {
    pub status: Option<TaskStatus>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub due_before: Option<NaiveDate>,
    pub due_after: Option<NaiveDate>,
    pub pagination: Pagination,
}
