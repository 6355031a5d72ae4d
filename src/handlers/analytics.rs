use axum::extract::State;
use axum::response::Json;
use chrono::Local;
use serde::Serialize;

use crate::date_utils::format_month_key;
use crate::db::queries::expenses;
use crate::error::AppResult;
use crate::models::insights::CategoryTotal;
use crate::services::{aggregator, patterns};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub monthly_totals: Vec<MonthlySummary>,
    pub average_monthly_spend: f64,
    pub current_month_total: f64,
    pub month_over_month_growth: f64,
    pub predicted_expenses: f64,
    pub top_categories: Vec<CategoryTotal>,
}

/// Aggregate rollups for the dashboard charts. Purely statistical; unlike
/// the AI endpoints this is available on the free tier.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<AnalyticsSummary>> {
    let conn = state.db.get()?;
    let expense_list = expenses::list_expenses(&conn, &Default::default())?;
    let today = Local::now().date_naive();

    let monthly = aggregator::monthly_totals(&expense_list);

    Ok(Json(AnalyticsSummary {
        average_monthly_spend: aggregator::average_monthly_spend(&monthly),
        current_month_total: aggregator::current_month_total(&expense_list, today),
        month_over_month_growth: patterns::month_over_month_growth(&monthly),
        predicted_expenses: patterns::predict_next_month(&monthly),
        top_categories: aggregator::top_categories(&expense_list),
        monthly_totals: monthly
            .into_iter()
            .map(|(key, total)| MonthlySummary {
                month: format_month_key(key),
                total,
            })
            .collect(),
    }))
}
