//! Route definitions for the `/tareas` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// ```text
/// POST   /tareas            -> create_task
/// GET    /tareas/usuario    -> list_tasks
/// GET    /tareas/{id}       -> get_task
/// PUT    /tareas/{id}       -> update_task
/// DELETE /tareas/{id}       -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tareas", post(task::create_task))
        .route("/tareas/usuario", get(task::list_tasks))
        .route(
            "/tareas/{id}",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
}
