pub mod analytics;
pub mod expenses;
pub mod export;
pub mod insights;
pub mod notifications;
pub mod recommendations;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Expense CRUD
        .route(
            "/api/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/expenses/:id",
            get(expenses::show)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        // Analytics rollups (free tier)
        .route("/api/analytics/summary", get(analytics::summary))
        // AI insights (pro tier)
        .route("/api/ai/insights", get(insights::generate))
        .route("/api/ai/analyze", post(insights::analyze))
        // Recommendations
        .route(
            "/api/recommendations",
            get(recommendations::list).put(recommendations::set_completed),
        )
        // Settings
        .route(
            "/api/settings",
            get(settings::show).put(settings::update),
        )
        // Export
        .route("/api/export/csv", get(export::csv))
        // Budget alerts
        .route("/api/notifications/test", post(notifications::run_check))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
