//! Integration tests for the CSV export endpoint.

mod common;

use axum::http::StatusCode;
use common::TestClient;

#[tokio::test]
async fn test_csv_export_empty_ledger() {
    let client = TestClient::new();
    let (status, body) = client.get("/api/export/csv").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "id,date,category,description,amount,notes");
}

#[tokio::test]
async fn test_csv_export_includes_expenses() {
    let client = TestClient::new();
    assert!(client.create_expense("2024-01-15", 42.5, "Food & Dining", "Lunch").await);
    assert!(client.create_expense("2024-02-01", 9.99, "Entertainment", "Movie rental").await);

    let (status, body) = client.get("/api/export/csv").await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(body.contains("Food & Dining"));
    assert!(body.contains("42.50"));
    assert!(body.contains("Movie rental"));
}
