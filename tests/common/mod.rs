//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the application router against an
//! in-memory database. Methods are intentionally broad to support various
//! test scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use http_body_util::BodyExt;
use outlay::auth;
use outlay::config::{AuthMode, Config};
use outlay::db::{create_in_memory_pool, migrations};
use outlay::handlers;
use outlay::services::mailer::Mailer;
use outlay::state::AppState;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tower_cookies::CookieManagerLayer;

/// A test client that simulates an API consumer, allowing sequential
/// requests against the application.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database
    /// (unauthenticated mode).
    pub fn new() -> Self {
        Self::with_auth_mode(AuthMode::Unauthenticated)
    }

    /// Create a new test client with a specific authentication mode.
    pub fn with_auth_mode(auth_mode: AuthMode) -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn).expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 8080,
            database_path: PathBuf::from(":memory:"),
            auth_mode,
            smtp: None,
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashSet::new())),
            mailer: Arc::new(Mailer::LogOnly),
        };

        Self { state }
    }

    /// Router without auth middleware, for direct handler testing.
    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Full router with auth middleware applied (mimics production setup).
    pub fn router_with_auth(&self) -> Router {
        use axum::middleware;

        handlers::routes()
            .route("/login", post(auth::login))
            .route("/logout", post(auth::logout))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth::auth_middleware,
            ))
            .layer(CookieManagerLayer::new())
            .with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request through the auth middleware, with an optional
    /// session cookie.
    pub async fn get_with_auth(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router_with_auth()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// POST a JSON body through the auth middleware and return status, body
    /// and any Set-Cookie header value.
    pub async fn post_with_auth(
        &self,
        uri: &str,
        json: serde_json::Value,
    ) -> (StatusCode, String, Option<String>) {
        let response = self
            .router_with_auth()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string(), set_cookie)
    }

    async fn request_json(
        &self,
        method: &str,
        uri: &str,
        json: serde_json::Value,
    ) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, json: serde_json::Value) -> (StatusCode, String) {
        self.request_json("POST", uri, json).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put_json(&self, uri: &str, json: serde_json::Value) -> (StatusCode, String) {
        self.request_json("PUT", uri, json).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create an expense via POST and return success status.
    pub async fn create_expense(
        &self,
        date: &str,
        amount: f64,
        category: &str,
        description: &str,
    ) -> bool {
        let (status, _) = self
            .post_json(
                "/api/expenses",
                serde_json::json!({
                    "date": date,
                    "amount": amount,
                    "category": category,
                    "description": description,
                }),
            )
            .await;
        status == StatusCode::CREATED
    }

    /// Apply a partial settings update and return success status.
    pub async fn update_settings(&self, json: serde_json::Value) -> bool {
        let (status, _) = self.put_json("/api/settings", json).await;
        status == StatusCode::OK
    }

    /// Enable the pro tier and switch the AI provider to the deterministic
    /// mock, the usual setup for exercising the AI endpoints in tests.
    pub async fn enable_pro_with_mock_ai(&self) {
        assert!(
            self.update_settings(serde_json::json!({
                "proTier": true,
                "aiProvider": "mock",
            }))
            .await
        );
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Today's date formatted for expense payloads; keeps "current month" test
/// fixtures in the current month wherever the suite runs.
pub fn today_string() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
