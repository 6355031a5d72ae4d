//! Integration tests for the budget monitor endpoint.
//!
//! The test client has no SMTP configuration, so the mailer runs log-only;
//! the outcome payload still reports how many alerts fired.

mod common;

use axum::http::StatusCode;
use common::{today_string, TestClient};
use serde_json::{json, Value};

#[tokio::test]
async fn test_check_skipped_when_alerts_disabled() {
    let client = TestClient::new();
    let (status, parsed): (_, Option<Value>) = {
        let (status, body) = client.post_json("/api/notifications/test", json!({})).await;
        (status, serde_json::from_str(&body).ok())
    };

    assert_eq!(status, StatusCode::OK);
    let outcome = parsed.unwrap();
    assert_eq!(outcome["skipped"], true);
    assert_eq!(outcome["alertsSent"], 0);
}

#[tokio::test]
async fn test_no_alerts_within_budget() {
    let client = TestClient::new();
    client.enable_pro_with_mock_ai().await;
    assert!(
        client
            .update_settings(json!({
                "monthlyBudget": 1000.0,
                "budgetAlerts": true,
                "alertEmail": "me@example.com",
            }))
            .await
    );
    assert!(client.create_expense(&today_string(), 100.0, "Shopping", "Socks").await);

    let (status, body) = client.post_json("/api/notifications/test", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let outcome: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(outcome["skipped"], false);
    assert_eq!(outcome["alertsSent"], 0);
}

#[tokio::test]
async fn test_exceeded_budget_fires_both_alerts() {
    let client = TestClient::new();
    client.enable_pro_with_mock_ai().await;
    assert!(
        client
            .update_settings(json!({
                "monthlyBudget": 100.0,
                "budgetAlerts": true,
                "alertEmail": "me@example.com",
            }))
            .await
    );
    assert!(client.create_expense(&today_string(), 150.0, "Shopping", "Splurge").await);

    let (status, body) = client.post_json("/api/notifications/test", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let outcome: Value = serde_json::from_str(&body).unwrap();

    // Past 100% also means past the 80% warning line
    assert_eq!(outcome["skipped"], false);
    assert_eq!(outcome["alertsSent"], 2);
}

#[tokio::test]
async fn test_zero_budget_never_alerts() {
    let client = TestClient::new();
    client.enable_pro_with_mock_ai().await;
    assert!(
        client
            .update_settings(json!({
                "budgetAlerts": true,
                "alertEmail": "me@example.com",
            }))
            .await
    );
    assert!(client.create_expense(&today_string(), 150.0, "Shopping", "Splurge").await);

    let (status, body) = client.post_json("/api/notifications/test", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let outcome: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(outcome["alertsSent"], 0);
}
