//! Budget alert evaluation: watches current-month spending against the
//! configured budget and emails the user when thresholds are crossed.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::date_utils::same_month;
use crate::error::AppResult;
use crate::models::expense::Expense;
use crate::models::insights::ExpenseData;
use crate::models::settings::{AiSettings, Settings};
use crate::services::mailer::{budget_alert_html, Mailer};
use crate::services::narrative::format_currency;
use crate::services::{aggregator, insights};

/// Percentage of budget that fires the early warning.
const WARNING_THRESHOLD_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetTrigger {
    ApproachingLimit { percentage: f64 },
    Exceeded { over_by: f64 },
}

impl BudgetTrigger {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::ApproachingLimit { .. } => "Budget Alert: Approaching Monthly Limit",
            Self::Exceeded { .. } => "Budget Alert: Monthly Budget Exceeded",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::ApproachingLimit { percentage } => {
                format!("You've used {:.1}% of your monthly budget", percentage)
            }
            Self::Exceeded { over_by } => format!(
                "You've exceeded your monthly budget by {}",
                format_currency(*over_by)
            ),
        }
    }
}

/// Which alerts the current spending level warrants. Both can fire at once:
/// spending past the budget is also past the warning line. A zero or unset
/// budget never fires.
pub fn evaluate_triggers(total_spent: f64, monthly_budget: f64) -> Vec<BudgetTrigger> {
    if monthly_budget <= 0.0 {
        return Vec::new();
    }

    let percentage = total_spent / monthly_budget * 100.0;
    let mut triggers = Vec::new();

    if percentage >= WARNING_THRESHOLD_PERCENT {
        triggers.push(BudgetTrigger::ApproachingLimit { percentage });
    }
    if total_spent > monthly_budget {
        triggers.push(BudgetTrigger::Exceeded {
            over_by: total_spent - monthly_budget,
        });
    }

    triggers
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCheckOutcome {
    pub skipped: bool,
    pub alerts_sent: usize,
}

/// Evaluate this month's spending and send one email per fired trigger,
/// each carrying the current AI recommendations.
pub async fn check_budget_and_notify(
    expenses: &[Expense],
    settings: &Settings,
    ai: &AiSettings,
    mailer: &Mailer,
    today: NaiveDate,
) -> AppResult<BudgetCheckOutcome> {
    if !settings.budget_alerts {
        debug!("Budget alerts disabled, skipping check");
        return Ok(BudgetCheckOutcome {
            skipped: true,
            alerts_sent: 0,
        });
    }

    if settings.alert_email.is_empty() {
        warn!("Budget alerts enabled but no alert email configured");
        return Ok(BudgetCheckOutcome {
            skipped: true,
            alerts_sent: 0,
        });
    }

    let current_month: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.parsed_date().is_some_and(|d| same_month(d, today)))
        .cloned()
        .collect();

    let total_spent: f64 = current_month.iter().map(|e| e.amount).sum();
    let triggers = evaluate_triggers(total_spent, settings.monthly_budget);

    if triggers.is_empty() {
        debug!(
            total_spent,
            monthly_budget = settings.monthly_budget,
            "Spending within budget, no alerts"
        );
        return Ok(BudgetCheckOutcome {
            skipped: false,
            alerts_sent: 0,
        });
    }

    // Personalized recommendations for the alert body come from the same
    // insight path, scoped to this month's expenses.
    let mut categories: Vec<String> = current_month.iter().map(|e| e.category.clone()).collect();
    categories.sort();
    categories.dedup();

    let data = ExpenseData {
        top_categories: aggregator::top_categories(&current_month),
        monthly_budget: settings.monthly_budget,
        categories,
        total_spent,
        average_daily: total_spent / today.day() as f64,
        expenses: current_month,
    };

    let report = insights::generate_insights(&data, ai, today).await?;

    let mut alerts_sent = 0;
    for trigger in &triggers {
        let html = budget_alert_html(
            &settings.alert_email,
            trigger.subject(),
            &trigger.message(),
            total_spent,
            settings.monthly_budget,
            &report.recommendations,
        );
        mailer
            .send(&settings.alert_email, trigger.subject(), html)
            .await?;
        alerts_sent += 1;
    }

    Ok(BudgetCheckOutcome {
        skipped: false,
        alerts_sent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_triggers_below_warning_threshold() {
        assert!(evaluate_triggers(500.0, 1000.0).is_empty());
        assert!(evaluate_triggers(799.0, 1000.0).is_empty());
    }

    #[test]
    fn warning_fires_at_eighty_percent() {
        let triggers = evaluate_triggers(800.0, 1000.0);
        assert_eq!(triggers.len(), 1);
        assert_eq!(
            triggers[0],
            BudgetTrigger::ApproachingLimit { percentage: 80.0 }
        );
        assert_eq!(
            triggers[0].message(),
            "You've used 80.0% of your monthly budget"
        );
    }

    #[test]
    fn exceeding_the_budget_fires_both_triggers() {
        let triggers = evaluate_triggers(1200.0, 1000.0);
        assert_eq!(triggers.len(), 2);
        assert!(matches!(
            triggers[0],
            BudgetTrigger::ApproachingLimit { .. }
        ));
        assert_eq!(triggers[1], BudgetTrigger::Exceeded { over_by: 200.0 });
        assert_eq!(
            triggers[1].message(),
            "You've exceeded your monthly budget by $200.00"
        );
    }

    #[test]
    fn zero_budget_never_fires() {
        assert!(evaluate_triggers(100.0, 0.0).is_empty());
        assert!(evaluate_triggers(100.0, -5.0).is_empty());
    }
}
