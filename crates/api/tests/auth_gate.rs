//! HTTP-level tests for the authentication gate.
//!
//! Rejected requests never reach a handler, so these run against a pool
//! that cannot connect.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json, send_raw,
    unreachable_pool, TEST_JWT_SECRET,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn signed(payload: serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn expired_token() -> String {
    let now = chrono::Utc::now().timestamp();
    signed(json!({ "sub": 1, "exp": now - 60, "iat": now - 120 }), TEST_JWT_SECRET)
}

const PROTECTED: [&str; 4] = ["/categorias", "/tareas/usuario", "/tareas/1", "/tareas/usuario?page=2"];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_header_is_rejected_on_every_protected_route() {
    for uri in PROTECTED {
        let response = get(build_test_app(unreachable_pool()), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn mutations_are_gated_too() {
    let app = build_test_app(unreachable_pool());

    let response = post_json(app.clone(), "/tareas", json!({ "title": "x" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(app.clone(), "/categorias", json!({ "name": "work" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete_auth(app, "/tareas/1", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let request = Request::builder()
        .uri("/tareas/usuario")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();

    let response = send_raw(build_test_app(unreachable_pool()), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected_with_expiry_message() {
    let response = get_auth(
        build_test_app(unreachable_pool()),
        "/tareas/usuario",
        &expired_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Token expired");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let exp = chrono::Utc::now().timestamp() + 3600;
    let forged = signed(json!({ "sub": 1, "exp": exp, "iat": 0 }), "someone-else");

    let response = get_auth(build_test_app(unreachable_pool()), "/categorias", &forged).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn unknown_path_is_not_found_rather_than_unauthorized() {
    let response = get(build_test_app(unreachable_pool()), "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_public_and_reports_database_state() {
    let response = get(build_test_app(unreachable_pool()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(build_test_app(unreachable_pool()), "/tareas/usuario").await;
    assert!(response.headers().contains_key("x-request-id"));
}
