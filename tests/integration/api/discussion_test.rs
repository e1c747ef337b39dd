//! Discussion and tag API integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{
    create_admin_user, create_discussion, create_post, create_test_user, silence_user, TestApp,
    SENSITIVE_WORD,
};
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_create_and_get_discussion() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .post(
            "/api/discussions",
            alice.token(),
            json!({ "title": "  Hello forum  ", "content": "first!", "tags": ["rust", "rust", " meta "] }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "Hello forum");
    assert_eq!(response.body["author_id"], alice.id);
    assert_eq!(response.body["comment_count"], 0);

    let id = response.body["id"].as_i64().unwrap();
    let response = app.get(&format!("/api/discussions/{}?include=user", id), None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["code"], 0);
    assert_eq!(response.body["data"]["id"], id);
    assert_eq!(
        response.body["entities"]["users"][alice.id.to_string()]["login"],
        "alice"
    );

    let tags = app.get("/api/tags", None).await;
    assert_status!(tags, StatusCode::OK);
    let texts: Vec<&str> = tags.body.as_array().unwrap().iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts.len(), 2);
    assert!(texts.contains(&"rust"));
    assert!(texts.contains(&"meta"));

    let tagged = app.get("/api/tags/rust/discussions", None).await;
    assert_status!(tagged, StatusCode::OK);
    assert_eq!(tagged.body["data"][0]["id"], id);
}

#[tokio::test]
async fn test_create_discussion_validation() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .post("/api/discussions", alice.token(), json!({ "title": "   " }))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "title cannot be empty");

    let response = app
        .post(
            "/api/discussions",
            alice.token(),
            json!({ "title": "ok", "content": format!("some {} here", SENSITIVE_WORD) }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "4001:sensitive content!");

    let response = app.post("/api/discussions", None, json!({ "title": "anonymous" })).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_silenced_user_cannot_start_discussion() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    silence_user(&app, alice.id).await;

    let response = app
        .post("/api/discussions", alice.token(), json!({ "title": "let me speak" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "!user silenced");
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let quiet = create_discussion(&app, &alice, "quiet").await;
    let busy = create_discussion(&app, &alice, "busy").await;
    let busy_id = busy["id"].as_i64().unwrap();
    create_post(&app, &alice, busy_id, 0, "a comment").await;

    let latest = app.get("/api/discussions", None).await;
    assert_status!(latest, StatusCode::OK);
    assert_eq!(latest.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(latest.body["has_more"], false);

    let unanswered = app.get("/api/discussions?filter=unanswered", None).await;
    let data = unanswered.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], quiet["id"]);

    let paged = app.get("/api/discussions?page=1&size=1", None).await;
    assert_eq!(paged.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(paged.body["has_more"], true);
}

#[tokio::test]
async fn test_update_and_delete_permissions() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let admin = create_admin_user(&app, "root").await;
    let discussion = create_discussion(&app, &alice, "mine").await;
    let uri = format!("/api/discussions/{}", discussion["id"]);

    let response = app.put(&uri, bob.token(), json!({ "title": "yours now" })).await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app.put(&uri, alice.token(), json!({ "title": "still mine" })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "still mine");

    let response = app.delete(&uri, bob.token()).await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app.delete(&uri, admin.token()).await;
    assert_status!(response, StatusCode::OK);

    let response = app.get(&uri, None).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_discussions_for_caller() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    create_discussion(&app, &alice, "by alice").await;
    create_discussion(&app, &bob, "by bob").await;

    let response = app.get("/api/users/0/discussions", alice.token()).await;
    assert_status!(response, StatusCode::OK);
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["author_id"], alice.id);

    let response = app.get("/api/users/0/discussions", None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/users/999/discussions", None).await;
    assert_error!(response, StatusCode::NOT_FOUND, "user not found");
}

#[tokio::test]
async fn test_tag_admin_only() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let admin = create_admin_user(&app, "root").await;

    let response = app
        .post("/api/tags", alice.token(), json!({ "text": "news" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "admin only");

    let response = app
        .post("/api/tags", admin.token(), json!({ "text": "news", "summary": "announcements" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let id = response.body["id"].as_i64().unwrap();

    let response = app
        .post("/api/tags", admin.token(), json!({ "text": "news" }))
        .await;
    assert_status!(response, StatusCode::CONFLICT);

    let response = app
        .put(&format!("/api/tags/{}", id), admin.token(), json!({ "summary": "site news" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["summary"], "site news");

    let response = app.delete(&format!("/api/tags/{}", id), admin.token()).await;
    assert_status!(response, StatusCode::OK);
    let tags = app.get("/api/tags", None).await;
    assert!(tags.body.as_array().unwrap().is_empty());
}
