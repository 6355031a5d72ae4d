use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    /// Stored dates are validated on write, but rows predating validation (or
    /// edited by hand) may not parse; analytics callers skip those.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        date_utils::parse_date(&self.date)
    }

    pub fn amount_formatted(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub notes: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= 0.0 || !self.amount.is_finite() {
            return Err("Amount must be a positive number".into());
        }
        if date_utils::parse_date(&self.date).is_none() {
            return Err(format!("Invalid date: {}", self.date));
        }
        if self.category.trim().is_empty() {
            return Err("Category is required".into());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewExpense {
        NewExpense {
            date: "2024-05-01".into(),
            amount: 12.5,
            category: "Food & Dining".into(),
            description: "Lunch".into(),
            notes: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_expense() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        let mut e = valid();
        e.amount = 0.0;
        assert!(e.validate().is_err());
        e.amount = -3.0;
        assert!(e.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_date() {
        let mut e = valid();
        e.date = "05/01/2024".into();
        assert!(e.validate().is_err());
    }
}
