//! The insight engine: merges the aggregation, pattern, savings and budget
//! planning components with the AI-authored recommendations into one report.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::insights::{ExpenseData, Insights, RecommendationStats};
use crate::models::recommendation::Recommendation;
use crate::models::settings::AiSettings;
use crate::services::{ai_client, aggregator, budget_plan, narrative, patterns, savings};

/// Generate the full insights report for a user's ledger.
///
/// With no expenses at all this short-circuits to a fixed onboarding payload
/// without touching the AI provider. Otherwise a missing provider credential
/// fails the call before any aggregation happens.
pub async fn generate_insights(
    data: &ExpenseData,
    ai: &AiSettings,
    today: NaiveDate,
) -> AppResult<Insights> {
    if data.expenses.is_empty() {
        debug!("No expenses recorded, returning onboarding insights");
        return Ok(cold_start_insights(data.monthly_budget, today));
    }

    if !ai.is_configured() {
        return Err(AppError::AiConfiguration(format!(
            "API key for provider '{}' is not set",
            ai.provider.as_str()
        )));
    }

    let monthly = aggregator::monthly_totals(&data.expenses);
    let average_monthly_spend = aggregator::average_monthly_spend(&monthly);
    let current_month_total = aggregator::current_month_total(&data.expenses, today);
    let total_saved = if average_monthly_spend > current_month_total {
        average_monthly_spend - current_month_total
    } else {
        0.0
    };

    let potential = savings::identify_potential_savings(&data.expenses, &data.top_categories, today);

    let prompt = narrative::insights_prompt(data, current_month_total, average_monthly_spend);
    let text = ai_client::generate_text(ai, &prompt).await?;
    let recommendations = narrative::parse_recommendations(&text);

    debug!(
        recommendation_count = recommendations.len(),
        opportunity_count = potential.opportunities.len(),
        "Generated insights"
    );

    Ok(Insights {
        total_saved,
        potential_savings: potential.total,
        top_expense_category: data
            .top_categories
            .first()
            .map(|c| c.category.clone())
            .unwrap_or_else(|| "No expenses yet".into()),
        unusual_expenses: patterns::unusual_expenses(&data.expenses, today),
        recommendation_stats: RecommendationStats {
            total: recommendations.len(),
            completed: 0,
            pending: recommendations.len(),
        },
        recommendations,
        month_over_month_growth: patterns::month_over_month_growth(&monthly),
        predicted_expenses: patterns::predict_next_month(&monthly),
        saving_opportunities: potential.opportunities,
        insights: text.split("\n\n").map(|s| s.to_string()).collect(),
        budget_plans: budget_plan::budget_plans(&data.expenses, data.monthly_budget, today),
    })
}

/// Answer a free-text question about the supplied ledger.
pub async fn analyze_expenses(
    question: &str,
    data: &ExpenseData,
    ai: &AiSettings,
) -> AppResult<String> {
    let prompt = narrative::analysis_prompt(question, data);
    ai_client::generate_text(ai, &prompt).await
}

/// Fixed payload for a ledger with no expenses yet.
fn cold_start_insights(monthly_budget: f64, today: NaiveDate) -> Insights {
    let recommendation = Recommendation::new(
        "Start by adding your first expense to get personalized recommendations".into(),
        "Getting Started".into(),
        1,
    );

    Insights {
        total_saved: 0.0,
        potential_savings: 0.0,
        top_expense_category: "No expenses yet".into(),
        unusual_expenses: Vec::new(),
        recommendations: vec![recommendation],
        recommendation_stats: RecommendationStats {
            total: 1,
            completed: 0,
            pending: 1,
        },
        month_over_month_growth: 0.0,
        predicted_expenses: 0.0,
        saving_opportunities: Vec::new(),
        insights: vec!["Start tracking your expenses to get AI-powered insights".into()],
        budget_plans: budget_plan::budget_plans(&[], monthly_budget, today),
    }
}

/// The safe payload handed back to the UI when insight generation fails;
/// the error message rides along so the client can surface it.
pub fn fallback_insights(error: &AppError) -> serde_json::Value {
    serde_json::json!({
        "error": error.to_string(),
        "recommendations": [],
        "recommendationStats": { "total": 0, "completed": 0, "pending": 0 },
        "totalSaved": 0,
        "potentialSavings": 0,
        "topExpenseCategory": "Error loading data",
        "unusualExpenses": [],
        "savingOpportunities": [],
    })
}
