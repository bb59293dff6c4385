//! Route definitions for the `/categorias` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// ```text
/// GET    /categorias        -> list_categories
/// POST   /categorias        -> create_category
/// DELETE /categorias/{id}   -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categorias",
            get(category::list_categories).post(category::create_category),
        )
        .route("/categorias/{id}", delete(category::delete_category))
}
