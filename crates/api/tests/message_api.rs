//! HTTP-level integration tests for the public contact form and the
//! admin-only message list.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_from, seed_admin};
use serde_json::json;
use sqlx::SqlitePool;

fn valid_message() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "Jane@Example.com",
        "message": "I would like to talk about a project.",
        "subject": "Collaboration",
        "phone": "+31 6 1234 5678"
    })
}

/// A valid submission is stored with normalized email and provenance.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_stores_the_message(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_from(
        app.clone(),
        "/api/messages",
        valid_message(),
        "203.0.113.7",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    // Visible to the admin, with the email lowercased and the origin kept.
    let token = common::login_admin(app.clone()).await;
    let response = get_auth(app, "/api/messages", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Jane Doe");
    assert_eq!(data[0]["email"], "jane@example.com");
    assert_eq!(data[0]["subject"], "Collaboration");
    assert_eq!(data[0]["message"], "I would like to talk about a project.");
    assert_eq!(data[0]["ipAddress"], "203.0.113.7");
    assert_eq!(data[0]["read"], false);
}

/// A blank subject falls back to the default.
#[sqlx::test(migrations = "../db/migrations")]
async fn blank_subject_defaults(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Jane",
        "email": "jane@example.com",
        "message": "Just saying hello to the team."
    });
    let response = post_json(app.clone(), "/api/messages", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = common::login_admin(app.clone()).await;
    let json = body_json(get_auth(app, "/api/messages", &token).await).await;
    assert_eq!(json["data"][0]["subject"], "No Subject");
}

/// Missing required fields are aggregated into one field-level list.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_aggregates_validation_failures(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/messages", json!({ "email": "not-an-email" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "ValidationFailed");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "message"]);
}

/// The message list is admin-gated.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_requires_admin(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/messages").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Messages come back newest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_newest_first(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    for i in 1..=3 {
        let body = json!({
            "name": format!("Sender {i}"),
            "email": "sender@example.com",
            "message": format!("Message number {i}, long enough to store.")
        });
        let response = post_json(app.clone(), "/api/messages", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let token = common::login_admin(app.clone()).await;
    let json = body_json(get_auth(app, "/api/messages", &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["name"], "Sender 3");
    assert_eq!(data[2]["name"], "Sender 1");
}
