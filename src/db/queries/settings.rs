use rusqlite::{params, Connection};
use std::collections::HashMap;

use crate::error::AppResult;
use crate::models::{AiSettings, Settings};

pub fn get_all_settings(conn: &Connection) -> rusqlite::Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;

    let settings = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<HashMap<_, _>, _>>()?;

    Ok(settings)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

/// Fetch all settings and convert to the Settings struct.
pub fn get_settings(conn: &Connection) -> AppResult<Settings> {
    let settings_map = get_all_settings(conn)?;
    Ok(Settings::from_map(&settings_map))
}

/// Fetch the AI provider configuration from the same settings table.
pub fn get_ai_settings(conn: &Connection) -> AppResult<AiSettings> {
    let settings_map = get_all_settings(conn)?;
    Ok(AiSettings::from_settings(&settings_map))
}
