use crate::error::{AppError, AppResult};
use crate::models::expense::Expense;

/// Render the expense ledger as CSV for download.
pub fn expenses_to_csv(expenses: &[Expense]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["id", "date", "category", "description", "amount", "notes"])
        .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;

    for expense in expenses {
        writer
            .write_record([
                expense.id.to_string(),
                expense.date.clone(),
                expense.category.clone(),
                expense.description.clone(),
                format!("{:.2}", expense.amount),
                expense.notes.clone().unwrap_or_default(),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_expense() {
        let expenses = vec![Expense {
            id: 7,
            date: "2024-06-01".into(),
            amount: 12.5,
            category: "Food & Dining".into(),
            description: "Lunch, with a comma".into(),
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }];

        let csv = expenses_to_csv(&expenses).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "id,date,category,description,amount,notes");
        // the comma-bearing description gets quoted
        assert!(lines[1].contains("\"Lunch, with a comma\""));
        assert!(lines[1].contains("12.50"));
    }

    #[test]
    fn empty_ledger_exports_header_only() {
        let csv = expenses_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
