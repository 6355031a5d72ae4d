use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries::recommendations;
use crate::error::{AppError, AppResult};
use crate::models::recommendation::Recommendation;
use crate::state::AppState;

/// List stored recommendations with completion stats.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let recommendation_list = recommendations::list_recommendations(&conn)?;

    let completed = recommendation_list.iter().filter(|r| r.completed).count();
    let stats = json!({
        "total": recommendation_list.len(),
        "completed": completed,
        "pending": recommendation_list.len() - completed,
    });

    Ok(Json(json!({
        "recommendations": recommendation_list,
        "stats": stats,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
    pub completed: bool,
}

/// Mark a recommendation as done or not done.
pub async fn set_completed(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> AppResult<Json<Recommendation>> {
    let conn = state.db.get()?;

    if !recommendations::set_completed(&conn, &request.id, request.completed)? {
        return Err(AppError::NotFound("Recommendation not found".into()));
    }

    let recommendation = recommendations::get_recommendation(&conn, &request.id)?
        .ok_or_else(|| AppError::NotFound("Recommendation not found".into()))?;

    Ok(Json(recommendation))
}
