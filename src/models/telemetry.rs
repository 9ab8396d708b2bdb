use rusqlite::params;
use serde::Serialize;

use crate::db::DbPool;

#[derive(Debug, Serialize)]
pub struct ActionCount {
    pub action: String,
    pub count: i64,
}

/// Point-in-time dashboard rollup, computed fresh on every call.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_users: i64,
    pub total_events: i64,
    pub active_events: i64,
    pub total_interactions: i64,
    pub recent_activity: Vec<ActionCount>,
}

pub struct Telemetry;

impl Telemetry {
    /// Append one interaction. Never updated afterwards.
    pub fn record(pool: &DbPool, user_id: i64, action: &str, metadata: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO telemetry (user_id, action, metadata) VALUES (?1, ?2, ?3)",
            params![user_id, action, metadata],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn stats(pool: &DbPool) -> Result<Stats, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        let total_users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| e.to_string())?;

        let total_events: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .map_err(|e| e.to_string())?;

        let active_events: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE is_active = 1", [], |row| {
                row.get(0)
            })
            .map_err(|e| e.to_string())?;

        let total_interactions: i64 = conn
            .query_row("SELECT COUNT(*) FROM telemetry", [], |row| row.get(0))
            .map_err(|e| e.to_string())?;

        // Per-action counts over the trailing week, busiest first.
        let mut stmt = conn
            .prepare(
                "SELECT action, COUNT(*) as count
                 FROM telemetry
                 WHERE created_at > datetime('now', '-7 days')
                 GROUP BY action
                 ORDER BY count DESC
                 LIMIT 10",
            )
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ActionCount {
                    action: row.get(0)?,
                    count: row.get(1)?,
                })
            })
            .map_err(|e| e.to_string())?;
        let recent_activity = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| e.to_string())?;

        Ok(Stats {
            total_users,
            total_events,
            active_events,
            total_interactions,
            recent_activity,
        })
    }
}
