use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::recommendation::Recommendation;

/// Snapshot of a user's ledger handed to the insight engine. Assembled by the
/// HTTP handlers (and the budget monitor) from the database; the engine never
/// touches storage itself.
#[derive(Debug, Clone)]
pub struct ExpenseData {
    /// Full expense history, most recent first.
    pub expenses: Vec<Expense>,
    pub monthly_budget: f64,
    pub categories: Vec<String>,
    pub total_spent: f64,
    pub average_daily: f64,
    /// Top spending categories, descending by total.
    pub top_categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingOpportunity {
    pub category: String,
    pub amount: f64,
    pub suggestion: String,
    pub details: Vec<String>,
    /// 1 (easy) to 3 (hard).
    pub difficulty: u8,
    /// 0-100 relative impact score.
    pub impact: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub category: String,
    pub current_spend: f64,
    pub recommended_budget: f64,
    pub adjustment_reason: String,
    pub saving_potential: f64,
    pub monthly_target: f64,
    pub weekly_allowance: f64,
    /// 0-95, derived from data volume, spending consistency and recency.
    pub confidence: u8,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// The full insights report returned to the caller. Recomputed from scratch
/// on every request; nothing here is persisted except the recommendations,
/// which the insights handler stores (replacing the previous set).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub total_saved: f64,
    pub potential_savings: f64,
    pub top_expense_category: String,
    pub unusual_expenses: Vec<Expense>,
    pub recommendations: Vec<Recommendation>,
    pub recommendation_stats: RecommendationStats,
    pub month_over_month_growth: f64,
    pub predicted_expenses: f64,
    pub saving_opportunities: Vec<SavingOpportunity>,
    pub insights: Vec<String>,
    pub budget_plans: Vec<BudgetPlan>,
}
