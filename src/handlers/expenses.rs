use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::expenses;
use crate::error::{AppError, AppResult};
use crate::models::expense::{Expense, NewExpense};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ExpenseListParams {
    fn into_filter(self) -> expenses::ExpenseFilter {
        expenses::ExpenseFilter {
            search: self.search,
            category: self.category,
            from_date: self.from_date,
            to_date: self.to_date,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ExpenseListParams>,
) -> AppResult<Json<Vec<Expense>>> {
    let conn = state.db.get()?;
    let expense_list = expenses::list_expenses(&conn, &params.into_filter())?;
    Ok(Json(expense_list))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Expense>> {
    let conn = state.db.get()?;
    let expense = expenses::get_expense(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Expense {} not found", id)))?;
    Ok(Json(expense))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new_expense): Json<NewExpense>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    new_expense.validate().map_err(AppError::Validation)?;

    let conn = state.db.get()?;
    let id = expenses::create_expense(&conn, &new_expense)?;
    let expense = expenses::get_expense(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created expense not found".into()))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(new_expense): Json<NewExpense>,
) -> AppResult<Json<Expense>> {
    new_expense.validate().map_err(AppError::Validation)?;

    let conn = state.db.get()?;
    if !expenses::update_expense(&conn, id, &new_expense)? {
        return Err(AppError::NotFound(format!("Expense {} not found", id)));
    }

    let expense = expenses::get_expense(&conn, id)?
        .ok_or_else(|| AppError::Internal("Updated expense not found".into()))?;
    Ok(Json(expense))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let conn = state.db.get()?;
    if !expenses::delete_expense(&conn, id)? {
        return Err(AppError::NotFound(format!("Expense {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
