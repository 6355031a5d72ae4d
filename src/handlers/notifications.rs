use axum::extract::State;
use axum::response::Json;
use chrono::Local;

use crate::db::queries::expenses;
use crate::error::AppResult;
use crate::services::budget_monitor::{self, BudgetCheckOutcome};
use crate::state::AppState;

/// Run the budget monitor once, immediately. Sends alert emails for any
/// threshold crossed this month.
pub async fn run_check(State(state): State<AppState>) -> AppResult<Json<BudgetCheckOutcome>> {
    let app_settings = state.load_settings()?;
    let ai_settings = state.load_ai_settings()?;

    let conn = state.db.get()?;
    let expense_list = expenses::list_expenses(&conn, &Default::default())?;
    let today = Local::now().date_naive();

    let outcome = budget_monitor::check_budget_and_notify(
        &expense_list,
        &app_settings,
        &ai_settings,
        &state.mailer,
        today,
    )
    .await?;

    Ok(Json(outcome))
}
