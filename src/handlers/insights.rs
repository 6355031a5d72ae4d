use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::db::queries::{expenses, recommendations, settings};
use crate::error::AppResult;
use crate::models::expense::Expense;
use crate::models::insights::ExpenseData;
use crate::services::{aggregator, insights};
use crate::state::AppState;

/// Build the engine's input snapshot from the stored ledger. The expense
/// list arrives most recent first (the query orders by date descending).
fn assemble_expense_data(expenses: Vec<Expense>, monthly_budget: f64, today: NaiveDate) -> ExpenseData {
    let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
    let current_month_total = aggregator::current_month_total(&expenses, today);

    let mut categories: Vec<String> = expenses.iter().map(|e| e.category.clone()).collect();
    categories.sort();
    categories.dedup();

    ExpenseData {
        top_categories: aggregator::top_categories(&expenses),
        average_daily: current_month_total / today.day() as f64,
        monthly_budget,
        categories,
        total_spent,
        expenses,
    }
}

fn pro_required() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "Pro subscription required" })),
    )
        .into_response()
}

/// Generate the insights report and persist its recommendations, replacing
/// the previous set. Engine failures surface as a safe all-zero payload with
/// the error message attached rather than a bare 500, so the dashboard can
/// always render.
pub async fn generate(State(state): State<AppState>) -> AppResult<Response> {
    let conn = state.db.get()?;

    let app_settings = settings::get_settings(&conn)?;
    if !app_settings.pro_tier {
        return Ok(pro_required());
    }

    let expense_list = expenses::list_expenses(&conn, &Default::default())?;
    let ai_settings = settings::get_ai_settings(&conn)?;
    let today = Local::now().date_naive();
    let data = assemble_expense_data(expense_list, app_settings.monthly_budget, today);

    match insights::generate_insights(&data, &ai_settings, today).await {
        Ok(report) => {
            if !report.recommendations.is_empty() {
                recommendations::replace_recommendations(&conn, &report.recommendations)?;
            }
            Ok(Json(report).into_response())
        }
        Err(e) => {
            error!("Error generating AI insights: {}", e);
            Ok(Json(insights::fallback_insights(&e)).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub question: Option<String>,
}

/// Ad-hoc Q&A over the user's ledger.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Response> {
    let question = match request.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Question is required" })),
            )
                .into_response());
        }
    };

    let conn = state.db.get()?;

    let app_settings = settings::get_settings(&conn)?;
    if !app_settings.pro_tier {
        return Ok(pro_required());
    }

    let expense_list = expenses::list_expenses(&conn, &Default::default())?;
    if expense_list.is_empty() {
        return Ok(Json(json!({
            "analysis": "I don't see any expenses recorded yet. Start by adding some expenses, and I'll help you analyze your spending patterns!"
        }))
        .into_response());
    }

    let ai_settings = settings::get_ai_settings(&conn)?;
    let today = Local::now().date_naive();
    let data = assemble_expense_data(expense_list, app_settings.monthly_budget, today);

    let analysis = insights::analyze_expenses(&question, &data, &ai_settings).await?;
    Ok(Json(json!({ "analysis": analysis })).into_response())
}
