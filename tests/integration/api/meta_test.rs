//! Site settings integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_admin_user, create_test_user, TestApp};
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_settings_roundtrip() {
    let app = TestApp::new().await;
    let admin = create_admin_user(&app, "root").await;

    let response = app.get("/api/meta", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!({}));

    let response = app
        .put(
            "/api/admin/meta",
            admin.token(),
            json!({ "site_name": "Kawa", "notice": "welcome" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["site_name"], "Kawa");

    let response = app
        .put("/api/admin/meta", admin.token(), json!({ "notice": "maintenance tonight" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!({ "site_name": "Kawa", "notice": "maintenance tonight" }));

    let response = app.get("/api/meta/notice", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["value"], "maintenance tonight");

    let response = app.get("/api/meta/missing", None).await;
    assert_error!(response, StatusCode::NOT_FOUND, "setting not found");
}

#[tokio::test]
async fn test_settings_are_admin_only() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let admin = create_admin_user(&app, "root").await;

    let response = app
        .put("/api/admin/meta", alice.token(), json!({ "site_name": "mine" }))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN, "admin only");

    let response = app.put("/api/admin/meta", None, json!({ "site_name": "mine" })).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = app.put("/api/admin/meta", admin.token(), json!({})).await;
    assert_error!(response, StatusCode::BAD_REQUEST, "no settings given");
}
