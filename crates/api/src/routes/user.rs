//! Route definitions for the `/usuarios` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// POST /usuarios                  -> register
/// POST /usuarios/iniciar-sesion   -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usuarios", post(user::register))
        .route("/usuarios/iniciar-sesion", post(user::login))
}
