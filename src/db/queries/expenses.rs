use crate::models::expense::{Expense, NewExpense};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

#[derive(Default)]
pub struct ExpenseFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub fn list_expenses(conn: &Connection, filter: &ExpenseFilter) -> rusqlite::Result<Vec<Expense>> {
    let mut sql = String::from(
        "SELECT id, date, amount, category, description, notes, created_at, updated_at
         FROM expenses WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(ref search) = filter.search {
        sql.push_str(" AND description LIKE ?");
        params_vec.push(Box::new(format!("%{}%", search)));
    }
    if let Some(ref category) = filter.category {
        sql.push_str(" AND category = ?");
        params_vec.push(Box::new(category.clone()));
    }
    if let Some(ref from_date) = filter.from_date {
        sql.push_str(" AND date >= ?");
        params_vec.push(Box::new(from_date.clone()));
    }
    if let Some(ref to_date) = filter.to_date {
        sql.push_str(" AND date <= ?");
        params_vec.push(Box::new(to_date.clone()));
    }

    sql.push_str(" ORDER BY date DESC, id DESC");

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit));
    }
    if let Some(offset) = filter.offset {
        sql.push_str(" OFFSET ?");
        params_vec.push(Box::new(offset));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;

    let expenses: Vec<Expense> = stmt
        .query_map(params_refs.as_slice(), row_to_expense)?
        .filter_map(|e| e.ok())
        .collect();

    debug!(count = expenses.len(), "Listed expenses");
    Ok(expenses)
}

pub fn count_expenses(conn: &Connection, filter: &ExpenseFilter) -> rusqlite::Result<i64> {
    let mut sql = String::from("SELECT COUNT(*) FROM expenses WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(ref search) = filter.search {
        sql.push_str(" AND description LIKE ?");
        params_vec.push(Box::new(format!("%{}%", search)));
    }
    if let Some(ref category) = filter.category {
        sql.push_str(" AND category = ?");
        params_vec.push(Box::new(category.clone()));
    }
    if let Some(ref from_date) = filter.from_date {
        sql.push_str(" AND date >= ?");
        params_vec.push(Box::new(from_date.clone()));
    }
    if let Some(ref to_date) = filter.to_date {
        sql.push_str(" AND date <= ?");
        params_vec.push(Box::new(to_date.clone()));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))
}

pub fn get_expense(conn: &Connection, id: i64) -> rusqlite::Result<Option<Expense>> {
    conn.query_row(
        "SELECT id, date, amount, category, description, notes, created_at, updated_at
         FROM expenses WHERE id = ?",
        [id],
        row_to_expense,
    )
    .optional()
}

pub fn create_expense(conn: &Connection, expense: &NewExpense) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (date, amount, category, description, notes)
         VALUES (?, ?, ?, ?, ?)",
        params![
            expense.date,
            expense.amount,
            expense.category,
            expense.description,
            expense.notes,
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(expense_id = id, amount = expense.amount, "Created expense");
    Ok(id)
}

pub fn update_expense(conn: &Connection, id: i64, expense: &NewExpense) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE expenses SET date = ?, amount = ?, category = ?, description = ?, notes = ?,
         updated_at = datetime('now')
         WHERE id = ?",
        params![
            expense.date,
            expense.amount,
            expense.category,
            expense.description,
            expense.notes,
            id,
        ],
    )?;

    if rows > 0 {
        debug!(expense_id = id, "Updated expense");
    }
    Ok(rows > 0)
}

pub fn delete_expense(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM expenses WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(expense_id = id, "Deleted expense");
    }
    Ok(rows > 0)
}

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
