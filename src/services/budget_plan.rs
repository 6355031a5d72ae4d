//! Per-category budget planning: a uniform reduction target, a weekly
//! allowance, a data-quality confidence score, and curated tips.

use chrono::NaiveDate;
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::models::expense::Expense;
use crate::models::insights::BudgetPlan;
use crate::services::aggregator;

/// Category totals are reduced to monthly averages over an assumed
/// three-month window.
const OBSERVATION_MONTHS: f64 = 3.0;

/// Uniform reduction target applied to every category's monthly average.
const REDUCTION_TARGET: f64 = 0.9;

/// Build budget plans for every category in the expense set, ranked by
/// saving potential. A computation failure (e.g. an unparseable stored date)
/// degrades to a single synthetic "Error" plan instead of propagating.
pub fn budget_plans(expenses: &[Expense], monthly_budget: f64, today: NaiveDate) -> Vec<BudgetPlan> {
    if expenses.is_empty() {
        return vec![starter_plan(monthly_budget)];
    }

    match plans_for_categories(expenses, today) {
        Ok(mut plans) => {
            plans.sort_by(|a, b| {
                b.saving_potential
                    .partial_cmp(&a.saving_potential)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            plans
        }
        Err(e) => {
            error!("Error generating budget plans: {}", e);
            vec![error_plan()]
        }
    }
}

fn plans_for_categories(expenses: &[Expense], today: NaiveDate) -> AppResult<Vec<BudgetPlan>> {
    let groups = aggregator::group_by_category(expenses);
    let mut plans = Vec::with_capacity(groups.len());

    for (category, group) in groups {
        let category_total: f64 = group.iter().map(|e| e.amount).sum();
        let monthly_average = category_total / OBSERVATION_MONTHS;
        let recommended_budget = (monthly_average * REDUCTION_TARGET).round();

        plans.push(BudgetPlan {
            current_spend: monthly_average,
            recommended_budget,
            adjustment_reason: adjustment_reason(monthly_average, recommended_budget),
            saving_potential: (monthly_average - recommended_budget).max(0.0),
            monthly_target: recommended_budget,
            weekly_allowance: (recommended_budget / 4.0).round(),
            confidence: confidence(&group, today)?,
            tips: tips_for_category(&category),
            category,
        });
    }

    Ok(plans)
}

fn adjustment_reason(current: f64, recommended: f64) -> String {
    let difference = current - recommended;
    let percent_change = if current != 0.0 {
        difference / current * 100.0
    } else {
        0.0
    };
    let rounded = percent_change.round() as i64;

    if percent_change > 20.0 {
        format!(
            "High potential for savings - consider reducing spending by {}%",
            rounded
        )
    } else if percent_change > 10.0 {
        format!(
            "Moderate savings possible - aim to reduce spending by {}%",
            rounded
        )
    } else if percent_change > 0.0 {
        format!(
            "Minor adjustments recommended - fine-tune spending by {}%",
            rounded
        )
    } else {
        "Current spending is within optimal range".into()
    }
}

/// Confidence in a plan, 0-95. More data points, consistent amounts and
/// recent activity all raise it.
fn confidence(group: &[&Expense], today: NaiveDate) -> AppResult<u8> {
    let data_points = (group.len() as f64 * 5.0).min(40.0);

    let amounts: Vec<f64> = group.iter().map(|e| e.amount).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amounts.len() as f64;
    let consistency = (40.0 - (variance / mean) * 10.0).max(0.0);

    let most_recent = group
        .iter()
        .map(|e| {
            e.parsed_date()
                .ok_or_else(|| AppError::Internal(format!("Unparseable expense date: {}", e.date)))
        })
        .collect::<AppResult<Vec<_>>>()?
        .into_iter()
        .max()
        .ok_or_else(|| AppError::Internal("Empty category group".into()))?;
    let days_since_latest = (today - most_recent).num_days() as f64;
    let recency = (20.0 - days_since_latest).max(0.0);

    Ok((data_points + consistency + recency).round().min(95.0) as u8)
}

fn starter_plan(monthly_budget: f64) -> BudgetPlan {
    let target = if monthly_budget > 0.0 {
        monthly_budget
    } else {
        1000.0
    };

    BudgetPlan {
        category: "Getting Started".into(),
        current_spend: 0.0,
        recommended_budget: target,
        adjustment_reason: "Start tracking your expenses to get personalized budgets".into(),
        saving_potential: 0.0,
        monthly_target: target,
        weekly_allowance: (target / 4.0).round(),
        confidence: 0,
        tips: vec![
            "Start adding your daily expenses".into(),
            "Categorize each expense properly".into(),
            "Set realistic budget goals".into(),
        ],
    }
}

fn error_plan() -> BudgetPlan {
    BudgetPlan {
        category: "Error".into(),
        current_spend: 0.0,
        recommended_budget: 0.0,
        adjustment_reason: "Error generating budget plans".into(),
        saving_potential: 0.0,
        monthly_target: 0.0,
        weekly_allowance: 0.0,
        confidence: 0,
        tips: vec![
            "Try refreshing the page".into(),
            "Contact support if the error persists".into(),
        ],
    }
}

const CATEGORY_TIPS: &[(&str, [&str; 5])] = &[
    (
        "Food & Dining",
        [
            "Plan your meals for the week",
            "Cook in bulk and freeze portions",
            "Use grocery store loyalty programs",
            "Compare prices across different stores",
            "Limit dining out to special occasions",
        ],
    ),
    (
        "Transportation",
        [
            "Consider carpooling options",
            "Use public transportation when possible",
            "Combine errands to save on fuel",
            "Keep up with vehicle maintenance",
            "Walk or bike for short distances",
        ],
    ),
    (
        "Shopping",
        [
            "Make a list and stick to it",
            "Wait 24 hours before large purchases",
            "Look for sales and discounts",
            "Compare prices online",
            "Unsubscribe from promotional emails",
        ],
    ),
    (
        "Entertainment",
        [
            "Look for free local events",
            "Use streaming services instead of cable",
            "Take advantage of happy hours",
            "Check for student/senior discounts",
            "Host gatherings at home",
        ],
    ),
    (
        "Utilities",
        [
            "Install energy-efficient bulbs",
            "Use a programmable thermostat",
            "Fix leaky faucets promptly",
            "Unplug devices when not in use",
            "Consider energy audit",
        ],
    ),
];

const DEFAULT_TIPS: [&str; 5] = [
    "Track expenses daily",
    "Set up spending alerts",
    "Review monthly statements",
    "Look for cheaper alternatives",
    "Create a specific budget",
];

fn tips_for_category(category: &str) -> Vec<String> {
    let tips = CATEGORY_TIPS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tips)| tips)
        .unwrap_or(&DEFAULT_TIPS);

    tips.iter().take(3).map(|t| t.to_string()).collect()
}
