//! Router-level behaviour: health check, fallback and extractor rejections

use axum::http::StatusCode;

use crate::common::TestApp;
use crate::{assert_error, assert_status};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.get("/api/nothing/here", None).await;
    assert_error!(response, StatusCode::NOT_FOUND, "route not found");
    assert_eq!(response.body["status"], 404);
}

#[tokio::test]
async fn test_bad_path_id() {
    let app = TestApp::new().await;
    let response = app.get("/api/posts/abc", None).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}
