//! Integration tests for the error envelope and middleware edge cases.
//!
//! Every error response carries the `{ "error": ..., "code": ... }` body, so
//! any frontend can surface failures uniformly.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_endpoint_reports_db_status(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/warehouses").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_slug_carries_the_error_envelope(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/brands/no-such-brand").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("no-such-brand"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_body_is_a_client_error(pool: PgPool) {
    // A signup body with the wrong shape must not 500.
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/signup",
        serde_json::json!({"nope": true}),
    )
    .await;
    assert!(
        response.status().is_client_error(),
        "expected 4xx, got {}",
        response.status()
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn validation_error_names_the_field_problem(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/signup",
        serde_json::json!({
            "username": "margot",
            "email": "not-an-email",
            "password": "atelier-vitrine-9",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn responses_carry_a_request_id(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert!(
        response.headers().contains_key("x-request-id"),
        "request id middleware should stamp every response"
    );
}
