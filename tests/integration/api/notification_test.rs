//! Notification API integration tests
//!
//! Notifications are written by the event handlers, so every test drives
//! them through the post and like endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_discussion, create_post, create_test_user, TestApp};
use crate::{assert_contains, assert_error, assert_status};

#[tokio::test]
async fn test_comment_reply_and_like_notifications() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;
    let discussion = create_discussion(&app, &alice, "Weekly thread").await;
    let did = discussion["id"].as_i64().unwrap();

    // bob comments: alice gets a comment
    let post = create_post(&app, &bob, did, 0, "hi alice").await;
    // carol replies to bob: alice gets a comment, bob a reply
    create_post(&app, &carol, did, bob.id, "hi bob").await;
    // alice likes bob's post: bob gets a like
    let response = app
        .post(&format!("/api/posts/{}/likes", post["id"]), alice.token(), json!({}))
        .await;
    assert_status!(response, StatusCode::OK);

    let response = app.get("/api/notifications/count", alice.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["comment"], 2);
    assert_eq!(response.body["reply"], 0);
    assert_eq!(response.body["total"], 2);

    let response = app.get("/api/notifications/count", bob.token()).await;
    assert_eq!(response.body["reply"], 1);
    assert_eq!(response.body["like"], 1);
    assert_eq!(response.body["comment"], 0);

    let response = app.get("/api/notifications/count", carol.token()).await;
    assert_eq!(response.body["total"], 0);

    let response = app
        .get("/api/notifications?kind=comment&include=user", alice.token())
        .await;
    assert_status!(response, StatusCode::OK);
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["from_id"], carol.id);
    assert_eq!(data[0]["content"], "Weekly thread");
    assert_eq!(data[0]["kind"], "comment");
    assert_eq!(response.body["entities"]["users"][bob.id.to_string()]["login"], "bob");
}

#[tokio::test]
async fn test_own_activity_is_not_notified() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let discussion = create_discussion(&app, &alice, "talking to myself").await;
    let post = create_post(&app, &alice, discussion["id"].as_i64().unwrap(), alice.id, "me").await;
    app.post(&format!("/api/posts/{}/likes", post["id"]), alice.token(), json!({}))
        .await;

    let response = app.get("/api/notifications/count", alice.token()).await;
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_mark_read() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let discussion = create_discussion(&app, &alice, "thread").await;
    let did = discussion["id"].as_i64().unwrap();
    create_post(&app, &bob, did, 0, "one").await;
    create_post(&app, &bob, did, 0, "two").await;

    let list = app.get("/api/notifications?kind=comment", alice.token()).await;
    let first_id = list.body["data"][0]["id"].as_i64().unwrap();

    // Only the recipient can mark it
    let response = app
        .put(&format!("/api/notifications/{}/read", first_id), bob.token(), json!({}))
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "notification not found");

    let response = app
        .put(&format!("/api/notifications/{}/read", first_id), alice.token(), json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    let count = app.get("/api/notifications/count", alice.token()).await;
    assert_eq!(count.body["comment"], 1);

    let response = app
        .put("/api/notifications/read?kind=comment", alice.token(), json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["updated"], 1);
    let count = app.get("/api/notifications/count", alice.token()).await;
    assert_eq!(count.body["total"], 0);
}

#[tokio::test]
async fn test_notification_kind_is_required() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app.get("/api/notifications", alice.token()).await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app.get("/api/notifications?kind=gossip", alice.token()).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_contains!(response.body["error"].as_str().unwrap(), "gossip");

    let response = app.get("/api/notifications?kind=like", None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}
