//! In-memory application fixture
//!
//! Each `TestApp` owns a private SQLite database and a router built the same
//! way the server builds it, with a cheap bcrypt cost and one sensitive word.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use kawa_forum::backend::events::EventBus;
use kawa_forum::backend::server::app_with_events;
use kawa_forum::backend::store::SqliteStore;
use kawa_forum::shared::config::AppConfig;

pub const SENSITIVE_WORD: &str = "forbiddenword";

/// Status and decoded body of one request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// JSON body, a string for non-JSON bodies, `Null` when empty
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_events(EventBus::with_default_handlers()).await
    }

    /// Fixture whose writes publish to `events` instead of the default handlers
    pub async fn with_events(events: EventBus) -> Self {
        let config = AppConfig::builder()
            .jwt_secret("test-secret")
            .bcrypt_cost(4)
            .sensitive_words(vec![SENSITIVE_WORD.to_string()])
            .build()
            .expect("Failed to build test config");
        let store = Arc::new(
            SqliteStore::in_memory()
                .await
                .expect("Failed to open in-memory store"),
        );
        let router = app_with_events(store.clone(), &config, events);
        Self { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
