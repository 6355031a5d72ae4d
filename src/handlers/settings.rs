use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::settings;
use crate::error::AppResult;
use crate::models::Settings;
use crate::state::AppState;

pub async fn show(State(state): State<AppState>) -> AppResult<Json<Settings>> {
    let conn = state.db.get()?;
    Ok(Json(settings::get_settings(&conn)?))
}

/// Partial settings update; only the supplied fields change. The AI API key
/// is write-only: it can be set here but is never echoed back by `show`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub monthly_budget: Option<f64>,
    pub budget_alerts: Option<bool>,
    pub alert_email: Option<String>,
    pub pro_tier: Option<bool>,
    pub currency: Option<String>,
    pub ai_provider: Option<String>,
    pub ai_base_url: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_model: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> AppResult<Json<Settings>> {
    let conn = state.db.get()?;

    if let Some(monthly_budget) = update.monthly_budget {
        settings::set_setting(&conn, "monthly_budget", &monthly_budget.to_string())?;
    }
    if let Some(budget_alerts) = update.budget_alerts {
        settings::set_setting(&conn, "budget_alerts", &budget_alerts.to_string())?;
    }
    if let Some(alert_email) = update.alert_email {
        settings::set_setting(&conn, "alert_email", &alert_email)?;
    }
    if let Some(pro_tier) = update.pro_tier {
        settings::set_setting(&conn, "pro_tier", &pro_tier.to_string())?;
    }
    if let Some(currency) = update.currency {
        settings::set_setting(&conn, "currency", &currency)?;
    }
    if let Some(ai_provider) = update.ai_provider {
        settings::set_setting(&conn, "ai_provider", &ai_provider)?;
    }
    if let Some(ai_base_url) = update.ai_base_url {
        settings::set_setting(&conn, "ai_base_url", &ai_base_url)?;
    }
    if let Some(ai_api_key) = update.ai_api_key {
        settings::set_setting(&conn, "ai_api_key", &ai_api_key)?;
    }
    if let Some(ai_model) = update.ai_model {
        settings::set_setting(&conn, "ai_model", &ai_model)?;
    }

    Ok(Json(settings::get_settings(&conn)?))
}
