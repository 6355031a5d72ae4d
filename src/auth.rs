//! Authentication middleware and handlers.
//!
//! Password-based authentication using Argon2 hashed passwords.
//! Authentication can be disabled by setting `OUTLAY_PASSWORD_HASH` to
//! `DANGEROUSLY_ALLOW_UNAUTHENTICATED_USERS`.
//!
//! Session tokens are cryptographically random UUIDs, validated against a
//! server-side session store. Tokens are invalidated on logout or server
//! restart.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::config::AuthMode;
use crate::state::AppState;

/// Cookie name for the session token.
const SESSION_COOKIE: &str = "session";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Authentication middleware; rejects unauthenticated requests with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip auth entirely when no password is configured
    if matches!(state.config.auth_mode, AuthMode::Unauthenticated) {
        return next.run(request).await;
    }

    // Check for valid session cookie against server-side store
    if let Some(session_cookie) = cookies.get(SESSION_COOKIE) {
        let token = session_cookie.value().to_string();
        let is_valid = state
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&token);
        if is_valid {
            return next.run(request).await;
        }
    }

    // Login and liveness stay reachable without a session
    let path = request.uri().path();
    if path == "/login" || path == "/health" {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Authentication required" })),
    )
        .into_response()
}

/// Handle login: verify the password and hand out a session cookie.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(request): Json<LoginRequest>,
) -> Response {
    let password_hash = match &state.config.auth_mode {
        AuthMode::Unauthenticated => {
            return Json(json!({ "ok": true })).into_response();
        }
        AuthMode::Password(hash) => hash,
    };

    if verify_password(&request.password, password_hash) {
        // Generate a cryptographically random session token
        let session_token = Uuid::new_v4().to_string();
        state
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(session_token.clone());

        let cookie = Cookie::build((SESSION_COOKIE, session_token))
            .path("/")
            .http_only(true)
            .same_site(tower_cookies::cookie::SameSite::Strict)
            .build();
        cookies.add(cookie);

        return Json(json!({ "ok": true })).into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid password" })),
    )
        .into_response()
}

/// Handle logout: drop the server-side session and clear the cookie.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    if let Some(session_cookie) = cookies.get(SESSION_COOKIE) {
        state
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(session_cookie.value());
    }

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build();
    cookies.remove(cookie);

    Json(json!({ "ok": true })).into_response()
}

/// Verify a password against an Argon2 hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::error!("Invalid password hash format in OUTLAY_PASSWORD_HASH");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
