//! Prompt construction for the generative AI collaborator and parsing of its
//! free-text responses into structured recommendations.

use crate::models::expense::Expense;
use crate::models::insights::ExpenseData;
use crate::models::recommendation::Recommendation;

/// Standing instruction prepended to every prompt.
pub const SYSTEM_CONTEXT: &str = "You are an AI Financial Assistant for an expense tracking application.
You help users understand their spending patterns, provide financial advice, and suggest ways to save money.
You have access to their expense data and can analyze patterns and trends.
Always be specific, practical, and data-driven in your responses.
Format currency values appropriately and be precise with numbers.
Consider monthly budgets, expense categories, and spending trends in your analysis.";

/// At most this many recommendations are kept from one response.
const MAX_RECOMMENDATIONS: usize = 5;

pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn top_categories_line(data: &ExpenseData) -> String {
    data.top_categories
        .iter()
        .map(|c| format!("{}: {}", c.category, format_currency(c.total)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn recent_expenses_line(expenses: &[Expense]) -> String {
    expenses
        .iter()
        .take(5)
        .map(|e| {
            format!(
                "{} - {}: {}",
                e.date,
                e.category,
                format_currency(e.amount)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt for the ad-hoc Q&A endpoint: data context plus the user's
/// free-text question.
pub fn analysis_prompt(question: &str, data: &ExpenseData) -> String {
    let context = format!(
        "Current Monthly Budget: {}\n\
         Total Spent This Month: {}\n\
         Daily Average: {}\n\
         Top Spending Categories: {}\n\
         \n\
         Recent Expenses: {}",
        format_currency(data.monthly_budget),
        format_currency(data.total_spent),
        format_currency(data.average_daily),
        top_categories_line(data),
        recent_expenses_line(&data.expenses),
    );

    format!(
        "{}\n\nContext:\n{}\n\nUser Question: {}\n\nProvide a detailed, specific answer based on the data provided:",
        SYSTEM_CONTEXT, context, question
    )
}

/// Prompt for the insights endpoint: asks for 3-5 bullet-pointed,
/// actionable recommendations.
pub fn insights_prompt(
    data: &ExpenseData,
    current_month_total: f64,
    average_monthly_spend: f64,
) -> String {
    format!(
        "{}\n\
         Analyze this financial data and provide 3-5 specific, actionable recommendations:\n\
         Monthly Budget: {}\n\
         Current Month Spending: {}\n\
         Average Monthly Spending: {}\n\
         Top Categories: {}\n\
         \n\
         Format each recommendation as a bullet point (\u{2022}) and make them specific and actionable.\n\
         Focus on:\n\
         1. Immediate saving opportunities\n\
         2. Spending habit improvements\n\
         3. Budget optimization\n\
         4. Category-specific advice",
        SYSTEM_CONTEXT,
        format_currency(data.monthly_budget),
        format_currency(current_month_total),
        format_currency(average_monthly_spend),
        top_categories_line(data),
    )
}

/// Extract recommendations from a model response: keep lines that start with
/// a bullet, strip the bullet, cap at five. A response with no bullet lines
/// is a valid empty result.
pub fn parse_recommendations(text: &str) -> Vec<Recommendation> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('\u{2022}'))
        .take(MAX_RECOMMENDATIONS)
        .map(|line| {
            let text = line.trim_start_matches('\u{2022}').trim().to_string();
            let category = categorize_recommendation(&text).to_string();
            let impact = estimate_impact(&text);
            Recommendation::new(text, category, impact)
        })
        .collect()
}

const RECOMMENDATION_CATEGORIES: &[(&str, &[&str])] = &[
    ("Savings", &["save", "reduce", "cut", "lower", "budget"]),
    ("Income", &["earn", "income", "revenue", "salary"]),
    ("Investment", &["invest", "portfolio", "stock", "fund"]),
    ("Debt", &["debt", "loan", "credit", "payment"]),
    ("Lifestyle", &["habit", "routine", "daily", "lifestyle"]),
];

/// First category whose keyword list matches; "General" otherwise.
pub fn categorize_recommendation(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    for (category, keywords) in RECOMMENDATION_CATEGORIES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return category;
        }
    }
    "General"
}

const HIGH_IMPACT_WORDS: &[&str] = &["significant", "substantial", "major", "considerable"];
const MEDIUM_IMPACT_WORDS: &[&str] = &["moderate", "reasonable", "decent"];

/// Impact 1-3 estimated from the intensity of the model's own wording.
pub fn estimate_impact(text: &str) -> i64 {
    let lower = text.to_lowercase();
    if HIGH_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        3
    } else if MEDIUM_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        2
    } else {
        1
    }
}
