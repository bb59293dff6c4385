//! Handlers for the `/tareas` resource.
//!
//! Every operation is scoped to the authenticated user; a task owned by
//! someone else answers exactly like a missing one.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::Json;
use mytasks_core::error::CoreError;
use mytasks_core::task::{
    parse_optional_date, resolve_create_status, resolve_update_status, DueDateChange,
};
use mytasks_core::types::DbId;
use mytasks_core::validation::{require_not_blank, ValidationError};
use mytasks_db::models::task::{CreateTask, Task, UpdateTask};
use mytasks_db::repositories::TaskRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{positive_id, AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::TaskListParams;
use crate::state::AppState;

/// Response header carrying the unpaginated match count of a listing.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tareas`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    /// Defaults to `Backlog` when absent or blank.
    pub status: Option<String>,
    pub priority: Option<i32>,
    /// `YYYY-MM-DD`.
    pub due_date: Option<String>,
}

impl CreateTaskRequest {
    fn into_input(self) -> Result<CreateTask, ValidationError> {
        Ok(CreateTask {
            title: require_not_blank("title", &self.title)?,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            category_id: self.category_id,
            parent_id: self.parent_id,
            status: resolve_create_status(self.status.as_deref())?,
            priority: self.priority.unwrap_or(0),
            due_date: parse_optional_date("due_date", self.due_date.as_deref())?,
        })
    }
}

/// Request body for `PUT /tareas/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    /// Blank clears the description, matching create where blank means none.
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    /// Blank means "leave as is".
    pub status: Option<String>,
    pub priority: Option<i32>,
    /// An empty string clears the date.
    pub due_date: Option<String>,
}

impl UpdateTaskRequest {
    fn into_input(self) -> Result<UpdateTask, ValidationError> {
        Ok(UpdateTask {
            title: self
                .title
                .as_deref()
                .map(|t| require_not_blank("title", t))
                .transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
            category_id: self.category_id,
            parent_id: self.parent_id,
            status: resolve_update_status(self.status.as_deref())?,
            priority: self.priority,
            due_date: DueDateChange::from_input(self.due_date.as_deref())?,
        })
    }
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /tareas
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let input = input.into_input()?;
    let task = TaskRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tareas/usuario
///
/// Filtered, paginated listing of the caller's tasks, newest first. The
/// total match count is returned in the `x-total-count` header.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<(HeaderMap, Json<Vec<Task>>)> {
    let filter = params.into_filter()?;

    let tasks = TaskRepo::list(&state.pool, auth.user_id, &filter).await?;
    let total = TaskRepo::count(&state.pool, auth.user_id, &filter).await?;

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    Ok((headers, Json(tasks)))
}

/// GET /tareas/{id}
pub async fn get_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Task>> {
    let id = positive_id(id)?;
    let task = TaskRepo::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// PUT /tareas/{id}
///
/// Partial update: only fields present in the body change.
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    let id = positive_id(id)?;

    if !TaskRepo::exists(&state.pool, id, auth.user_id).await? {
        return Err(task_not_found(id));
    }

    let input = input.into_input()?;
    let task = TaskRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    tracing::info!(user_id = auth.user_id, task_id = id, "Task updated");
    Ok(Json(task))
}

/// DELETE /tareas/{id}
///
/// Soft delete; the row stays but is hidden from every read.
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let id = positive_id(id)?;

    if !TaskRepo::soft_delete(&state.pool, id, auth.user_id).await? {
        return Err(task_not_found(id));
    }

    tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
