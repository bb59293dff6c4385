//! Bearer-token authentication gate and the [`AuthUser`] extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use mytasks_core::types::DbId;

use crate::auth::jwt::{verify_token, AuthError, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Identity of the caller, attached to the request by [`require_auth`].
///
/// Use this as an extractor parameter in any handler behind the gate:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<StatusCode> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// Authentication gate, installed with
/// `axum::middleware::from_fn_with_state` on the protected router.
///
/// On failure answers 401 and the downstream handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = authenticate(request.headers().get(AUTHORIZATION), &state.config.jwt)
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected unauthenticated request"))?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Resolve the raw `Authorization` header value to a user id.
pub fn authenticate(header: Option<&HeaderValue>, config: &JwtConfig) -> Result<DbId, AuthError> {
    let token = header
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::Missing)?;

    verify_token(token, config)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AppError::Auth(AuthError::Missing))
    }
}
