//! Handlers for the `/categorias` resource.
//!
//! Categories are shared by all users; every route still requires a valid
//! token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mytasks_core::error::CoreError;
use mytasks_core::types::DbId;
use mytasks_core::validation::require_min_chars;
use mytasks_db::models::category::{Category, CreateCategory};
use mytasks_db::repositories::CategoryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{positive_id, AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum category name length after trimming.
const MIN_NAME_LENGTH: usize = 3;

/// Request body for `POST /categorias`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// POST /categorias
///
/// The duplicate-name check and the insert are separate statements, so two
/// concurrent requests for the same name can both succeed.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let name = require_min_chars("name", &input.name, MIN_NAME_LENGTH)?;

    if CategoryRepo::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category '{name}' already exists"
        ))));
    }

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let category = CategoryRepo::create(&state.pool, &CreateCategory { name, description }).await?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = category.id,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categorias
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// DELETE /categorias/{id}
///
/// Hard delete. Tasks keep whatever `category_id` they had.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let id = positive_id(id)?;

    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
