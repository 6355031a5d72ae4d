use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::db::queries::expenses;
use crate::error::AppResult;
use crate::services::export;
use crate::state::AppState;

/// Download the full expense ledger as a CSV attachment.
pub async fn csv(State(state): State<AppState>) -> AppResult<Response> {
    let conn = state.db.get()?;
    let expense_list = expenses::list_expenses(&conn, &Default::default())?;
    let body = export::expenses_to_csv(&expense_list)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
