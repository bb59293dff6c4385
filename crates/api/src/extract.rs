//! Extractors whose rejections use the JSON error body.
//!
//! Axum's stock `Json`, `Query` and `Path` reject with plain text; these
//! wrappers route the rejection through [`AppError`] instead.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use mytasks_core::types::DbId;

use crate::error::{AppError, AppResult};

/// JSON request body. Malformed or mistyped bodies become 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters. Unparseable values become 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters. Unparseable segments become 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Reject ids that can never name a row.
pub fn positive_id(id: DbId) -> AppResult<DbId> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!(
            "id must be a positive integer, got {id}"
        )));
    }
    Ok(id)
}
