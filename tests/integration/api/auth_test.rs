//! Authentication API integration tests
//!
//! Tests for the authentication endpoints including login, signup, and user info.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_test_user, TestApp, TEST_PASSWORD};
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "login": "alice", "email": "alice@example.com", "password": TEST_PASSWORD }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body["token"].is_string());
    assert_eq!(response.body["user"]["login"], "alice");
    assert_eq!(response.body["user"]["role"], "member");
    assert!(response.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_login() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice").await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "login": "alice", "email": "other@example.com", "password": TEST_PASSWORD }),
        )
        .await;

    assert_status!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "login": "alice", "email": "alice@example.com", "password": "short" }),
        )
        .await;

    assert_error!(response, StatusCode::BAD_REQUEST, "Password must be at least 8 characters");
}

#[tokio::test]
async fn test_login_by_login_and_email() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    for name in ["alice", "alice@example.com"] {
        let response = app
            .post("/api/auth/login", None, json!({ "login": name, "password": TEST_PASSWORD }))
            .await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["user"]["id"], alice.id);
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice").await;

    let response = app
        .post("/api/auth/login", None, json!({ "login": "alice", "password": "wrong_password" }))
        .await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "invalid credentials");

    let response = app
        .post("/api/auth/login", None, json!({ "login": "nobody", "password": TEST_PASSWORD }))
        .await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "invalid credentials");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app.get("/api/auth/me", alice.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["login"], "alice");

    let response = app.get("/api/auth/me", None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/auth/me", Some("not-a-jwt")).await;
    assert_error!(response, StatusCode::UNAUTHORIZED, "invalid token");
}
