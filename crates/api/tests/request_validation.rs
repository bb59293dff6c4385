//! Malformed requests from an authenticated caller are answered with 400
//! before any database access, so these also run against an unreachable pool.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{
    body_json, build_test_app, get_auth, post_json, post_json_auth, put_json_auth, send_raw,
    test_config, unreachable_pool,
};
use mytasks_api::auth::jwt::generate_access_token;
use serde_json::json;

fn token() -> String {
    generate_access_token(1, &test_config().jwt).unwrap()
}

#[tokio::test]
async fn non_positive_path_id_is_bad_request() {
    for uri in ["/tareas/0", "/tareas/-3"] {
        let response = get_auth(build_test_app(unreachable_pool()), uri, &token()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn non_numeric_path_id_is_json_bad_request() {
    let response = get_auth(build_test_app(unreachable_pool()), "/tareas/abc", &token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_body_is_json_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tareas")
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = send_raw(build_test_app(unreachable_pool()), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let response = post_json_auth(
        build_test_app(unreachable_pool()),
        "/tareas",
        json!({ "title": "   " }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_status_on_create_is_rejected() {
    let response = post_json_auth(
        build_test_app(unreachable_pool()),
        "/tareas",
        json!({ "title": "t", "status": "Sin Empezar" }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_due_date_on_create_is_rejected() {
    let response = post_json_auth(
        build_test_app(unreachable_pool()),
        "/tareas",
        json!({ "title": "t", "due_date": "01/02/2025" }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("due_date"));
}

#[tokio::test]
async fn bad_list_filters_are_rejected() {
    for uri in [
        "/tareas/usuario?estado=Pending",
        "/tareas/usuario?due_before=tomorrow",
        "/tareas/usuario?page=abc",
    ] {
        let response = get_auth(build_test_app(unreachable_pool()), uri, &token()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn short_category_name_is_rejected() {
    let response = post_json_auth(
        build_test_app(unreachable_pool()),
        "/categorias",
        json!({ "name": " ab " }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registration_rules_are_checked_before_storage() {
    let app = build_test_app(unreachable_pool());

    let short_name = post_json(app.clone(), "/usuarios", json!({ "username": "al", "password": "secret1" })).await;
    assert_eq!(short_name.status(), StatusCode::BAD_REQUEST);

    let short_password = post_json(app, "/usuarios", json!({ "username": "alice", "password": "abc" })).await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
    let json = body_json(short_password).await;
    assert_eq!(json["error"], "password must be at least 4 characters long");
}

#[tokio::test]
async fn put_with_unknown_field_types_is_rejected() {
    let response = put_json_auth(
        build_test_app(unreachable_pool()),
        "/tareas/5",
        json!({ "priority": "high" }),
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
