//! Handlers for the `/usuarios` resource (registration and login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mytasks_core::error::CoreError;
use mytasks_core::types::DbId;
use mytasks_core::validation::require_min_chars;
use mytasks_db::models::user::CreateUser;
use mytasks_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Minimum username length after trimming.
const MIN_USERNAME_LENGTH: usize = 3;

/// Returned for both unknown users and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /usuarios`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    #[validate(length(min = 4, message = "password must be at least 4 characters long"))]
    pub password: String,
    pub picture_url: Option<String>,
}

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Request body for `POST /usuarios/iniciar-sesion`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /usuarios
///
/// Create an account. A taken username is a 409.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    let username = require_min_chars("username", &input.username, MIN_USERNAME_LENGTH)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let picture_url = input
        .picture_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            password_hash,
            picture_url,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            picture_url: user.picture_url,
        }),
    ))
}

/// POST /usuarios/iniciar-sesion
///
/// Exchange username + password for an access token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user_name: user.username,
    }))
}
