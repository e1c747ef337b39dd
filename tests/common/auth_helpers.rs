//! Authentication test helpers
//!
//! Provides utilities for creating test users through the signup endpoint
//! and promoting or silencing them directly in the store.

use serde_json::{json, Value};

use kawa_forum::backend::store::UserStore;
use kawa_forum::shared::forum::Role;

use super::app::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: i64,
    pub login: String,
    pub token: String,
}

impl TestUser {
    pub fn token(&self) -> Option<&str> {
        Some(self.token.as_str())
    }
}

/// Sign `login` up with `<login>@example.com` and the test password
pub async fn create_test_user(app: &TestApp, login: &str) -> TestUser {
    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "login": login,
                "email": format!("{}@example.com", login),
                "password": TEST_PASSWORD,
            }),
        )
        .await;
    assert!(
        response.status.is_success(),
        "signup failed for {}: {}",
        login,
        response.body
    );

    TestUser {
        id: response.body["user"]["id"].as_i64().expect("user id"),
        login: login.to_string(),
        token: response.body["token"].as_str().expect("token").to_string(),
    }
}

/// Create a user and give it the admin role
pub async fn create_admin_user(app: &TestApp, login: &str) -> TestUser {
    let admin = create_test_user(app, login).await;
    let mut user = app.store.get_user(admin.id).await.expect("admin exists");
    user.role = Role::Admin;
    app.store.update_user(&user).await.expect("promote admin");
    admin
}

pub async fn silence_user(app: &TestApp, id: i64) {
    let mut user = app.store.get_user(id).await.expect("user exists");
    user.silenced = true;
    app.store.update_user(&user).await.expect("silence user");
}

/// Start a discussion and return its JSON
pub async fn create_discussion(app: &TestApp, author: &TestUser, title: &str) -> Value {
    let response = app
        .post(
            "/api/discussions",
            author.token(),
            json!({ "title": title, "content": "opening words" }),
        )
        .await;
    assert!(response.status.is_success(), "create discussion: {}", response.body);
    response.body
}

/// Post `content` in `discussion_id`, replying to user `reply_id` when non-zero
pub async fn create_post(
    app: &TestApp,
    author: &TestUser,
    discussion_id: i64,
    reply_id: i64,
    content: &str,
) -> Value {
    let response = app
        .post(
            "/api/posts",
            author.token(),
            json!({ "discussion_id": discussion_id, "reply_id": reply_id, "content": content }),
        )
        .await;
    assert!(response.status.is_success(), "create post: {}", response.body);
    response.body
}
