//! Integration tests for authentication middleware and the login flow.

mod common;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use axum::http::StatusCode;
use common::TestClient;
use outlay::config::AuthMode;
use serde_json::json;

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("hashing failed")
        .to_string()
}

#[tokio::test]
async fn test_unauthenticated_mode_allows_everything() {
    let client = TestClient::new();
    let (status, _) = client.get_with_auth("/api/expenses", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_api_requires_session_in_password_mode() {
    let client = TestClient::with_auth_mode(AuthMode::Password(hash_password("hunter2")));
    let (status, body) = client.get_with_auth("/api/expenses", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Authentication required"));
}

#[tokio::test]
async fn test_health_stays_open_in_password_mode() {
    let client = TestClient::with_auth_mode(AuthMode::Password(hash_password("hunter2")));
    let (status, body) = client.get_with_auth("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let client = TestClient::with_auth_mode(AuthMode::Password(hash_password("hunter2")));
    let (status, body, set_cookie) = client
        .post_with_auth("/login", json!({ "password": "letmein" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid password"));
    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn test_login_grants_session_access() {
    let client = TestClient::with_auth_mode(AuthMode::Password(hash_password("hunter2")));

    let (status, _, set_cookie) = client
        .post_with_auth("/login", json!({ "password": "hunter2" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = set_cookie.expect("session cookie issued");
    let session = cookie.split(';').next().unwrap().to_string();

    let (status, _) = client.get_with_auth("/api/expenses", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);

    // A made-up token is still rejected
    let (status, _) = client
        .get_with_auth("/api/expenses", Some("session=forged-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
