pub mod category;
pub mod health;
pub mod task;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Routes reachable without a token.
///
/// ```text
/// /usuarios                     register
/// /usuarios/iniciar-sesion      login
/// ```
pub fn public_routes() -> Router<AppState> {
    Router::new().merge(user::router())
}

/// Routes that sit behind the authentication gate.
///
/// ```text
/// /categorias                   create, list
/// /categorias/{id}              delete
///
/// /tareas                       create
/// /tareas/usuario               list (filters + pagination)
/// /tareas/{id}                  get, update, delete
/// ```
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(category::router())
        .merge(task::router())
}
