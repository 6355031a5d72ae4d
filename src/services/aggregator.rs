//! Calendar-month and category rollups over an in-memory expense list.
//!
//! Everything here is a pure function of its inputs: the invocation date is
//! passed in explicitly, the input slice is never mutated, and absent data
//! yields zeros and empty collections rather than errors.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::date_utils::{month_key, same_month, MonthKey};
use crate::models::expense::Expense;
use crate::models::insights::CategoryTotal;

/// Sum of amounts per calendar month. The BTreeMap keys sort
/// chronologically, so iteration order is oldest month first.
pub fn monthly_totals(expenses: &[Expense]) -> BTreeMap<MonthKey, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        if let Some(date) = expense.parsed_date() {
            *totals.entry(month_key(date)).or_insert(0.0) += expense.amount;
        }
    }
    totals
}

/// Sum of amounts per category across the whole supplied list.
pub fn category_totals(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Total spent in the calendar month containing `today`.
pub fn current_month_total(expenses: &[Expense], today: NaiveDate) -> f64 {
    expenses
        .iter()
        .filter(|e| e.parsed_date().is_some_and(|d| same_month(d, today)))
        .map(|e| e.amount)
        .sum()
}

/// Arithmetic mean of the monthly totals; 0 when there are no months.
pub fn average_monthly_spend(monthly: &BTreeMap<MonthKey, f64>) -> f64 {
    if monthly.is_empty() {
        return 0.0;
    }
    monthly.values().sum::<f64>() / monthly.len() as f64
}

/// Top spending categories, descending by total, capped at 5.
pub fn top_categories(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = category_totals(expenses)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    totals.truncate(5);
    totals
}

/// Group full expense records by category, preserving input order within
/// each group.
pub fn group_by_category<'a>(expenses: &'a [Expense]) -> HashMap<String, Vec<&'a Expense>> {
    let mut groups: HashMap<String, Vec<&Expense>> = HashMap::new();
    for expense in expenses {
        groups.entry(expense.category.clone()).or_default().push(expense);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::Expense;

    fn expense(date: &str, amount: f64, category: &str, description: &str) -> Expense {
        Expense {
            id: 0,
            date: date.into(),
            amount,
            category: category.into(),
            description: description.into(),
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn three_months() -> Vec<Expense> {
        vec![
            expense("2024-01-10", 100.0, "Food & Dining", "Groceries"),
            expense("2024-01-20", 50.0, "Shopping", "Socks"),
            expense("2024-02-05", 200.0, "Food & Dining", "Groceries"),
            expense("2024-03-01", 40.0, "Transportation", "Bus pass"),
            expense("2024-03-15", 60.0, "Food & Dining", "Takeout"),
        ]
    }

    #[test]
    fn monthly_totals_group_by_calendar_month() {
        let totals = monthly_totals(&three_months());
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[&(2024, 1)], 150.0);
        assert_eq!(totals[&(2024, 2)], 200.0);
        assert_eq!(totals[&(2024, 3)], 100.0);
    }

    #[test]
    fn average_monthly_spend_is_mean_of_month_sums() {
        let totals = monthly_totals(&three_months());
        // (150 + 200 + 100) / 3, independent of input order
        assert_eq!(average_monthly_spend(&totals), 150.0);

        let mut shuffled = three_months();
        shuffled.reverse();
        assert_eq!(average_monthly_spend(&monthly_totals(&shuffled)), 150.0);
    }

    #[test]
    fn average_monthly_spend_is_zero_on_empty_input() {
        assert_eq!(average_monthly_spend(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn current_month_total_filters_by_month_and_year() {
        let expenses = vec![
            expense("2024-03-01", 40.0, "Transportation", "Bus pass"),
            expense("2024-03-15", 60.0, "Food & Dining", "Takeout"),
            expense("2023-03-15", 999.0, "Food & Dining", "Last year"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(current_month_total(&expenses, today), 100.0);
    }

    #[test]
    fn top_categories_ranked_descending_and_capped() {
        let mut expenses = three_months();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            expenses.push(expense("2024-03-20", i as f64 + 1.0, name, "x"));
        }
        let top = top_categories(&expenses);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].category, "Food & Dining");
        assert_eq!(top[0].total, 360.0);
        for pair in top.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn aggregation_is_pure_and_repeatable() {
        let expenses = three_months();
        let snapshot: Vec<(String, f64)> = expenses
            .iter()
            .map(|e| (e.date.clone(), e.amount))
            .collect();

        let first = monthly_totals(&expenses);
        let second = monthly_totals(&expenses);
        assert_eq!(first, second);

        let cat_first = category_totals(&expenses);
        let cat_second = category_totals(&expenses);
        assert_eq!(cat_first, cat_second);

        // Input untouched
        let after: Vec<(String, f64)> = expenses
            .iter()
            .map(|e| (e.date.clone(), e.amount))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn unparseable_dates_are_skipped_not_fatal() {
        let expenses = vec![
            expense("2024-01-10", 100.0, "Food & Dining", "ok"),
            expense("garbage", 50.0, "Food & Dining", "bad date"),
        ];
        let totals = monthly_totals(&expenses);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&(2024, 1)], 100.0);
        // category rollup does not depend on the date
        assert_eq!(category_totals(&expenses)["Food & Dining"], 150.0);
    }
}
