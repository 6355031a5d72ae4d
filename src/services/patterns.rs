//! Spending pattern detection: statistical outliers, recurring-charge
//! signals, and month-over-month movement.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::date_utils::{same_month, MonthKey};
use crate::models::expense::Expense;

const SUBSCRIPTION_KEYWORDS: &[&str] = &["subscription", "netflix", "spotify", "membership", "monthly"];
const UTILITY_KEYWORDS: &[&str] = &["utility", "electric", "water", "gas", "internet", "phone"];

/// Expenses in the current calendar month whose amount exceeds the month's
/// mean by more than two population standard deviations.
///
/// Fewer than two expenses this month yields an empty set: there is no
/// meaningful deviation to measure from a single point.
pub fn unusual_expenses(expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
    let this_month: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.parsed_date().is_some_and(|d| same_month(d, today)))
        .collect();

    if this_month.len() < 2 {
        return Vec::new();
    }

    let amounts: Vec<f64> = this_month.iter().map(|e| e.amount).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amounts.len() as f64;
    let std_dev = variance.sqrt();
    let threshold = mean + 2.0 * std_dev;

    this_month
        .into_iter()
        .filter(|e| e.amount > threshold)
        .cloned()
        .collect()
}

/// Whether any description carries a subscription-style keyword
/// (case-insensitive substring match).
pub fn has_subscription_expenses(expenses: &[Expense]) -> bool {
    has_keyword(expenses, SUBSCRIPTION_KEYWORDS)
}

/// Whether any description carries a utility-style keyword.
pub fn has_utility_expenses(expenses: &[Expense]) -> bool {
    has_keyword(expenses, UTILITY_KEYWORDS)
}

fn has_keyword(expenses: &[Expense], keywords: &[&str]) -> bool {
    expenses.iter().any(|e| {
        let description = e.description.to_lowercase();
        keywords.iter().any(|k| description.contains(k))
    })
}

/// Growth of the most recent month over the one before it, in percent.
/// 0 when there are fewer than two months of data or the previous month's
/// total is 0.
pub fn month_over_month_growth(monthly: &BTreeMap<MonthKey, f64>) -> f64 {
    let totals: Vec<f64> = monthly.values().copied().collect();
    if totals.len() < 2 {
        return 0.0;
    }

    let current = totals[totals.len() - 1];
    let previous = totals[totals.len() - 2];
    if previous == 0.0 {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}

/// Moving-average prediction for next month: mean of the last three (or
/// fewer) monthly totals. With a single month of data that month's total is
/// the prediction; with none, 0.
pub fn predict_next_month(monthly: &BTreeMap<MonthKey, f64>) -> f64 {
    let totals: Vec<f64> = monthly.values().copied().collect();
    if totals.len() < 2 {
        return totals.first().copied().unwrap_or(0.0);
    }

    let recent = &totals[totals.len().saturating_sub(3)..];
    recent.iter().sum::<f64>() / recent.len() as f64
}
