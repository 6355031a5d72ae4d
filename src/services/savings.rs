//! Savings estimation: maps top spending categories to heuristic reduction
//! targets and surfaces ranked saving opportunities.

use chrono::NaiveDate;

use crate::models::expense::Expense;
use crate::models::insights::{CategoryTotal, SavingOpportunity};
use crate::services::{aggregator, patterns};

/// Category totals are assumed to cover a three-month window when reduced to
/// a monthly average.
const OBSERVATION_MONTHS: f64 = 3.0;

/// Opportunities below this absolute amount are noise and get suppressed.
const MIN_SAVING_AMOUNT: f64 = 50.0;

struct SavingHeuristic {
    category: &'static str,
    reduction: f64,
    suggestion: &'static str,
    details: [&'static str; 3],
    difficulty: u8,
}

const HEURISTICS: &[SavingHeuristic] = &[
    SavingHeuristic {
        category: "Food & Dining",
        reduction: 0.30,
        suggestion: "Optimize your food spending with meal planning and smart shopping",
        details: [
            "Plan meals weekly to reduce food waste",
            "Buy groceries in bulk when on sale",
            "Cook meals at home instead of eating out",
        ],
        difficulty: 2,
    },
    SavingHeuristic {
        category: "Shopping",
        reduction: 0.25,
        suggestion: "Implement strategic shopping habits to reduce unnecessary expenses",
        details: [
            "Use price comparison tools",
            "Wait for sales on non-essential items",
            "Implement a 24-hour rule for purchases",
        ],
        difficulty: 1,
    },
    SavingHeuristic {
        category: "Entertainment",
        reduction: 0.35,
        suggestion: "Find more cost-effective entertainment options",
        details: [
            "Look for free local events",
            "Use entertainment passes and memberships",
            "Share subscription services with family",
        ],
        difficulty: 1,
    },
    SavingHeuristic {
        category: "Transportation",
        reduction: 0.20,
        suggestion: "Optimize your transportation costs",
        details: [
            "Use public transportation when possible",
            "Combine errands to save fuel",
            "Consider carpooling options",
        ],
        difficulty: 2,
    },
];

static DEFAULT_HEURISTIC: SavingHeuristic = SavingHeuristic {
    category: "",
    reduction: 0.15,
    suggestion: "Review and optimize spending in this category",
    details: [
        "Track expenses more closely",
        "Look for more affordable alternatives",
        "Set a specific budget",
    ],
    difficulty: 2,
};

fn heuristic_for(category: &str) -> &'static SavingHeuristic {
    HEURISTICS
        .iter()
        .find(|h| h.category == category)
        .unwrap_or(&DEFAULT_HEURISTIC)
}

/// Impact score relative to the category's own monthly average.
fn impact_score(saving_amount: f64, monthly_spend: f64) -> u8 {
    let percentage = if monthly_spend > 0.0 {
        saving_amount / monthly_spend * 100.0
    } else {
        0.0
    };
    if percentage >= 25.0 {
        90
    } else if percentage >= 15.0 {
        75
    } else if percentage >= 10.0 {
        60
    } else {
        45
    }
}

pub struct PotentialSavings {
    /// Sum of all opportunity amounts, rounded to a whole unit.
    pub total: f64,
    pub opportunities: Vec<SavingOpportunity>,
}

/// Rank saving opportunities across the top spending categories plus the
/// cross-cutting subscription/utility signals.
pub fn identify_potential_savings(
    expenses: &[Expense],
    top_categories: &[CategoryTotal],
    today: NaiveDate,
) -> PotentialSavings {
    let mut opportunities = Vec::new();
    let mut total = 0.0;

    for category in top_categories {
        let monthly_spend = category.total / OBSERVATION_MONTHS;
        let heuristic = heuristic_for(&category.category);
        let amount = monthly_spend * heuristic.reduction;

        if amount >= MIN_SAVING_AMOUNT {
            opportunities.push(SavingOpportunity {
                category: category.category.clone(),
                amount: amount.round(),
                suggestion: heuristic.suggestion.to_string(),
                details: heuristic.details.iter().map(|d| d.to_string()).collect(),
                difficulty: heuristic.difficulty,
                impact: impact_score(amount, monthly_spend),
            });
            total += amount;
        }
    }

    let month_total = aggregator::current_month_total(expenses, today);

    if patterns::has_subscription_expenses(expenses) {
        let amount = month_total * 0.05;
        opportunities.push(SavingOpportunity {
            category: "Subscriptions".into(),
            amount,
            suggestion: "Review and optimize your subscription services".into(),
            details: vec![
                "Audit all active subscriptions".into(),
                "Cancel unused services".into(),
                "Look for bundle deals".into(),
            ],
            difficulty: 1,
            impact: 65,
        });
        total += amount;
    }

    if patterns::has_utility_expenses(expenses) {
        let amount = month_total * 0.03;
        opportunities.push(SavingOpportunity {
            category: "Utilities".into(),
            amount,
            suggestion: "Reduce utility costs with simple changes".into(),
            details: vec![
                "Use energy-efficient appliances".into(),
                "Optimize thermostat settings".into(),
                "Fix any leaks or inefficiencies".into(),
            ],
            difficulty: 2,
            impact: 75,
        });
        total += amount;
    }

    opportunities.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));

    PotentialSavings {
        total: total.round(),
        opportunities,
    }
}
