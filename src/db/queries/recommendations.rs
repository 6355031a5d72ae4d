use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::models::recommendation::Recommendation;

pub fn list_recommendations(conn: &Connection) -> rusqlite::Result<Vec<Recommendation>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, category, completed, impact, created_at, completed_at
         FROM recommendations
         ORDER BY created_at DESC, id",
    )?;

    let recommendations = stmt
        .query_map([], |row| {
            Ok(Recommendation {
                id: row.get(0)?,
                text: row.get(1)?,
                category: row.get(2)?,
                completed: row.get::<_, i64>(3)? != 0,
                impact: row.get(4)?,
                created_at: row.get(5)?,
                completed_at: row.get(6)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(recommendations)
}

pub fn get_recommendation(conn: &Connection, id: &str) -> rusqlite::Result<Option<Recommendation>> {
    conn.query_row(
        "SELECT id, text, category, completed, impact, created_at, completed_at
         FROM recommendations WHERE id = ?",
        [id],
        |row| {
            Ok(Recommendation {
                id: row.get(0)?,
                text: row.get(1)?,
                category: row.get(2)?,
                completed: row.get::<_, i64>(3)? != 0,
                impact: row.get(4)?,
                created_at: row.get(5)?,
                completed_at: row.get(6)?,
            })
        },
    )
    .optional()
}

/// Replace the stored recommendation set with a freshly generated one.
/// Each generation supersedes the previous one wholesale.
pub fn replace_recommendations(
    conn: &Connection,
    recommendations: &[Recommendation],
) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM recommendations", [])?;

    for rec in recommendations {
        conn.execute(
            "INSERT INTO recommendations (id, text, category, completed, impact)
             VALUES (?, ?, ?, ?, ?)",
            params![rec.id, rec.text, rec.category, rec.completed as i64, rec.impact],
        )?;
    }

    debug!(count = recommendations.len(), "Replaced recommendations");
    Ok(())
}

/// Mark a recommendation as done (or not). Stamps `completed_at` so the UI
/// can show when it happened.
pub fn set_completed(conn: &Connection, id: &str, completed: bool) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE recommendations
         SET completed = ?,
             completed_at = CASE WHEN ? THEN datetime('now') ELSE NULL END
         WHERE id = ?",
        params![completed as i64, completed as i64, id],
    )?;

    Ok(rows > 0)
}
