//! Query parameter types for API handlers.

use mytasks_core::pagination::Pagination;
use mytasks_core::task::{parse_optional_date, search_pattern, TaskStatus};
use mytasks_core::types::DbId;
use mytasks_core::validation::ValidationError;
use mytasks_db::models::task::TaskListFilter;
use serde::Deserialize;

/// Query parameters for `GET /tareas/usuario`.
///
/// Blank values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    /// Status literal (`Backlog`, `In_Progress`, `Done`).
    pub estado: Option<String>,
    pub categoria_id: Option<DbId>,
    /// Case-insensitive substring of title or description.
    pub q: Option<String>,
    /// Inclusive upper bound on `due_date` (`YYYY-MM-DD`).
    pub due_before: Option<String>,
    /// Inclusive lower bound on `due_date` (`YYYY-MM-DD`).
    pub due_after: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl TaskListParams {
    /// Validate and convert into a repository filter.
    pub fn into_filter(self) -> Result<TaskListFilter, ValidationError> {
        let status = match self.estado.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(literal) => Some(literal.parse::<TaskStatus>()?),
        };

        Ok(TaskListFilter {
            status,
            category_id: self.categoria_id,
            search: self.q.as_deref().and_then(search_pattern),
            due_before: parse_optional_date("due_before", self.due_before.as_deref())?,
            due_after: parse_optional_date("due_after", self.due_after.as_deref())?,
            pagination: Pagination::new(self.page, self.page_size),
        })
    }
}
