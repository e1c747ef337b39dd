//! Direct message integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_test_user, silence_user, TestApp, SENSITIVE_WORD};
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_conversation_flow() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;

    for content in ["hi bob", "are you there?"] {
        let response = app
            .post("/api/chats", alice.token(), json!({ "to_id": bob.id, "content": content }))
            .await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["from_id"], alice.id);
        assert_eq!(response.body["status"], 0);
    }
    let response = app
        .post("/api/chats", carol.token(), json!({ "to_id": bob.id, "content": "hello from carol" }))
        .await;
    assert_status!(response, StatusCode::OK);

    // One entry per peer, the most recent conversation first
    let response = app.get("/api/chats?include=user", bob.token()).await;
    assert_status!(response, StatusCode::OK);
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["content"], "hello from carol");
    assert_eq!(data[1]["content"], "are you there?");
    assert_eq!(response.body["entities"]["users"][alice.id.to_string()]["login"], "alice");

    let response = app.get(&format!("/api/chats/{}", alice.id), bob.token()).await;
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["content"], "are you there?");

    let response = app
        .put(&format!("/api/chats/{}/read", alice.id), bob.token(), json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["updated"], 2);

    let response = app.get(&format!("/api/chats/{}", bob.id), alice.token()).await;
    let data = response.body["data"].as_array().unwrap();
    assert!(data.iter().all(|m| m["status"] == 1));

    // Carol's message is still unread
    let response = app
        .put(&format!("/api/chats/{}/read", carol.id), bob.token(), json!({}))
        .await;
    assert_eq!(response.body["updated"], 1);
}

#[tokio::test]
async fn test_send_rejections() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .post("/api/chats", None, json!({ "to_id": bob.id, "content": "hi" }))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/api/chats", alice.token(), json!({ "to_id": 999, "content": "hi" }))
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "user not found");

    let response = app
        .post("/api/chats", alice.token(), json!({ "to_id": alice.id, "content": "hi" }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "cannot message yourself");

    let response = app
        .post("/api/chats", alice.token(), json!({ "to_id": bob.id, "content": SENSITIVE_WORD }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "4001:sensitive content!");

    silence_user(&app, alice.id).await;
    let response = app
        .post("/api/chats", alice.token(), json!({ "to_id": bob.id, "content": "hi" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "!user silenced");
}
