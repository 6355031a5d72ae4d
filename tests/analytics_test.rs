//! Integration tests for the analytics summary JSON API.

mod common;

use axum::http::StatusCode;
use common::{today_string, TestClient};
use serde_json::Value;

#[tokio::test]
async fn test_summary_empty_ledger() {
    let client = TestClient::new();
    let (status, parsed): (_, Option<Value>) = client.get_json("/api/analytics/summary").await;

    assert_eq!(status, StatusCode::OK);
    let summary = parsed.unwrap();
    assert_eq!(summary["monthlyTotals"], serde_json::json!([]));
    assert_eq!(summary["averageMonthlySpend"], 0.0);
    assert_eq!(summary["currentMonthTotal"], 0.0);
    assert_eq!(summary["monthOverMonthGrowth"], 0.0);
    assert_eq!(summary["predictedExpenses"], 0.0);
}

#[tokio::test]
async fn test_summary_aggregates_across_months() {
    let client = TestClient::new();
    assert!(client.create_expense("2024-01-05", 100.0, "Food & Dining", "Rent-adjacent").await);
    assert!(client.create_expense("2024-01-20", 50.0, "Shopping", "Socks").await);
    assert!(client.create_expense("2024-02-05", 150.0, "Food & Dining", "Groceries").await);

    let (status, parsed): (_, Option<Value>) = client.get_json("/api/analytics/summary").await;
    assert_eq!(status, StatusCode::OK);
    let summary = parsed.unwrap();

    let months = summary["monthlyTotals"].as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"], "2024-1");
    assert_eq!(months[0]["total"], 150.0);
    assert_eq!(months[1]["month"], "2024-2");
    assert_eq!(months[1]["total"], 150.0);

    assert_eq!(summary["averageMonthlySpend"], 150.0);
    assert_eq!(summary["monthOverMonthGrowth"], 0.0);

    let top = summary["topCategories"].as_array().unwrap();
    assert_eq!(top[0]["category"], "Food & Dining");
    assert_eq!(top[0]["total"], 250.0);
}

#[tokio::test]
async fn test_summary_current_month_total() {
    let client = TestClient::new();
    assert!(client.create_expense("2020-01-05", 999.0, "Shopping", "Ancient history").await);
    assert!(client.create_expense(&today_string(), 40.0, "Transportation", "Bus pass").await);

    let (_, parsed): (_, Option<Value>) = client.get_json("/api/analytics/summary").await;
    let summary = parsed.unwrap();
    assert_eq!(summary["currentMonthTotal"], 40.0);
}
