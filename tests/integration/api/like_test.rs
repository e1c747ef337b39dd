//! Like API integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_discussion, create_post, create_test_user, TestApp};
use crate::{assert_error, assert_status};

async fn like_count(app: &TestApp, post_id: i64) -> i64 {
    let response = app.get(&format!("/api/posts/{}", post_id), None).await;
    response.body["data"]["like_count"].as_i64().unwrap()
}

#[tokio::test]
async fn test_like_toggle_keeps_count() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let discussion = create_discussion(&app, &alice, "thread").await;
    let post = create_post(&app, &alice, discussion["id"].as_i64().unwrap(), 0, "like me").await;
    let post_id = post["id"].as_i64().unwrap();
    let uri = format!("/api/posts/{}/likes", post_id);

    let response = app.post(&uri, bob.token(), json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], 1);
    let like_id = response.body["id"].clone();
    assert_eq!(like_count(&app, post_id).await, 1);

    // Liking twice changes nothing
    let response = app.post(&uri, bob.token(), json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(like_count(&app, post_id).await, 1);

    let response = app.delete(&uri, bob.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], 0);
    assert_eq!(like_count(&app, post_id).await, 0);

    let response = app.delete(&uri, bob.token()).await;
    assert_error!(response, StatusCode::NOT_FOUND, "like not found");

    // Re-liking reactivates the same row
    let response = app.post(&uri, bob.token(), json!({})).await;
    assert_eq!(response.body["id"], like_id);
    assert_eq!(response.body["status"], 1);
    assert_eq!(like_count(&app, post_id).await, 1);
}

#[tokio::test]
async fn test_like_unknown_post() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app.post("/api/posts/404/likes", alice.token(), json!({})).await;
    assert_error!(response, StatusCode::NOT_FOUND, "post not found");

    let response = app.post("/api/posts/404/likes", None, json!({})).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_lists() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let carol = create_test_user(&app, "carol").await;
    let discussion = create_discussion(&app, &alice, "thread").await;
    let post = create_post(&app, &alice, discussion["id"].as_i64().unwrap(), 0, "popular").await;
    let uri = format!("/api/posts/{}/likes", post["id"]);

    app.post(&uri, bob.token(), json!({})).await;
    app.post(&uri, carol.token(), json!({})).await;
    app.delete(&uri, carol.token()).await;

    let response = app.get(&format!("{}?include=user", uri), None).await;
    assert_status!(response, StatusCode::OK);
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["user_id"], bob.id);
    assert_eq!(response.body["entities"]["users"][bob.id.to_string()]["login"], "bob");

    let response = app.get("/api/users/0/likes", bob.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["data"][0]["post_id"], post["id"]);

    let response = app.get(&format!("/api/users/{}/likes", carol.id), None).await;
    assert!(response.body["data"].as_array().unwrap().is_empty());
}
