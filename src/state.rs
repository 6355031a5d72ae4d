use crate::config::Config;
use crate::db::queries::settings;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{AiSettings, Settings};
use crate::services::mailer::Mailer;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Server-side session store holding valid session tokens.
pub type SessionStore = Arc<Mutex<HashSet<String>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Load application settings from the database.
    pub fn load_settings(&self) -> AppResult<Settings> {
        let conn = self.db.get()?;
        settings::get_settings(&conn)
    }

    /// Load the AI provider configuration from the database.
    pub fn load_ai_settings(&self) -> AppResult<AiSettings> {
        let conn = self.db.get()?;
        settings::get_ai_settings(&conn)
    }
}
