//! Report, user management and admin dashboard integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{
    create_admin_user, create_discussion, create_post, create_test_user, TestApp, TEST_PASSWORD,
};
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_report_lifecycle() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let admin = create_admin_user(&app, "root").await;
    let discussion = create_discussion(&app, &alice, "thread").await;
    let post = create_post(&app, &alice, discussion["id"].as_i64().unwrap(), 0, "rude").await;

    let response = app
        .post(
            "/api/reports",
            bob.token(),
            json!({ "entity_type": "post", "entity_id": post["id"], "reason": "  " }),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "reason cannot be empty");

    let response = app
        .post(
            "/api/reports",
            bob.token(),
            json!({ "entity_type": "discussion", "entity_id": 999, "reason": "spam" }),
        )
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "discussion not found");

    let response = app
        .post(
            "/api/reports",
            bob.token(),
            json!({ "entity_type": "post", "entity_id": post["id"], "reason": " rude " }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["reason"], "rude");
    assert_eq!(response.body["status"], "open");
    let uri = format!("/api/reports/{}", response.body["id"]);

    assert_status!(app.get(&uri, bob.token()).await, StatusCode::FORBIDDEN);

    let response = app.put(&uri, admin.token(), json!({ "status": "resolved" })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "resolved");

    let response = app.get(&uri, admin.token()).await;
    assert_eq!(response.body["reporter_id"], bob.id);
    assert_eq!(response.body["status"], "resolved");
}

#[tokio::test]
async fn test_update_user_rules() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let admin = create_admin_user(&app, "root").await;
    let alice_uri = format!("/api/users/{}", alice.id);

    let response = app.put(&alice_uri, alice.token(), json!({ "nickname": " Al " })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["nickname"], "Al");

    let response = app.put(&alice_uri, bob.token(), json!({ "nickname": "hacked" })).await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app.put(&alice_uri, alice.token(), json!({ "role": "admin" })).await;
    assert_error!(response, StatusCode::FORBIDDEN, "admin only");

    let response = app.put(&alice_uri, admin.token(), json!({ "silenced": true })).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["silenced"], true);

    let public = app.get(&alice_uri, None).await;
    assert_status!(public, StatusCode::OK);
    assert_eq!(public.body["login"], "alice");
    assert!(public.body.get("email").is_none());

    assert_status!(app.delete(&alice_uri, bob.token()).await, StatusCode::FORBIDDEN);
    assert_status!(app.delete(&alice_uri, admin.token()).await, StatusCode::OK);
    assert_error!(app.get(&alice_uri, None).await, StatusCode::NOT_FOUND, "user not found");
}

#[tokio::test]
async fn test_admin_endpoints_require_admin() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    for uri in ["/api/admin/stats", "/api/admin/daily/users", "/api/admin/search/users"] {
        assert_error!(app.get(uri, alice.token()).await, StatusCode::FORBIDDEN, "admin only");
        assert_status!(app.get(uri, None).await, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_stats_and_daily() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let admin = create_admin_user(&app, "root").await;
    create_discussion(&app, &alice, "one").await;

    let response = app.get("/api/admin/stats", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total_users"], 2);
    assert_eq!(response.body["new_users_today"], 2);
    assert_eq!(response.body["total_discussions"], 1);
    assert_eq!(response.body["new_discussions_today"], 1);
    assert_eq!(response.body["active_users_today"], 0);

    let response = app
        .post("/api/auth/login", None, json!({ "login": "alice", "password": TEST_PASSWORD }))
        .await;
    assert_status!(response, StatusCode::OK);
    let response = app.get("/api/admin/stats", admin.token()).await;
    assert_eq!(response.body["active_users_today"], 1);

    let response = app.get("/api/admin/daily/active", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    let days = response.body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["count"], 1);

    let response = app.get("/api/admin/daily/users", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    let days = response.body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["count"], 2);
    assert_eq!(
        response.body["to"].as_i64().unwrap() - response.body["from"].as_i64().unwrap(),
        7 * 86_400
    );

    let response = app
        .get("/api/admin/daily/posts?from=2020-01-01&to=2020-01-31", admin.token())
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(response.body["days"].as_array().unwrap().is_empty());

    let response = app
        .get("/api/admin/daily/posts?from=2020-02-01&to=2020-01-01", admin.token())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = app.get("/api/admin/daily/widgets", admin.token()).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let admin = create_admin_user(&app, "root").await;
    let discussion = create_discussion(&app, &alice, "Rust tips").await;
    let did = discussion["id"].as_i64().unwrap();
    create_post(&app, &alice, did, 0, "use clippy").await;
    create_post(&app, &bob, did, 0, "use rustfmt").await;

    let response = app.get("/api/admin/search/users?q=ali", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["email"], "alice@example.com");
    assert!(response.body["data"][0].get("password_hash").is_none());

    let response = app
        .get(&format!("/api/admin/search/posts?q=use&author_id={}", bob.id), admin.token())
        .await;
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["content"], "use rustfmt");

    let response = app
        .get("/api/admin/search/posts?q=use&page=2&size=1", admin.token())
        .await;
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);

    let response = app.get("/api/admin/search/discussions?q=rust", admin.token()).await;
    assert_eq!(response.body["total"], 1);

    let response = app.get("/api/admin/search/reports?status=0", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 0);

    let response = app.get("/api/admin/search/widgets", admin.token()).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_wildcards_are_literal() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let admin = create_admin_user(&app, "root").await;
    let discussion = create_discussion(&app, &alice, "odds").await;
    let did = discussion["id"].as_i64().unwrap();
    create_post(&app, &alice, did, 0, "100% sure").await;
    create_post(&app, &alice, did, 0, "nothing special here").await;
    create_post(&app, &alice, did, 0, "snake_case wins").await;

    // %25 is '%'
    let response = app.get("/api/admin/search/posts?q=%25", admin.token()).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["content"], "100% sure");

    let response = app.get("/api/admin/search/posts?q=_", admin.token()).await;
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["content"], "snake_case wins");
}
