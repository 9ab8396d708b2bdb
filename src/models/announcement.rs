use chrono::NaiveDateTime;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

/// A broadcast announcement. A row here records intent to broadcast;
/// the bot process that fans it out to end users only reads these rows
/// and stamps scheduled_at / sent_at.
#[derive(Debug, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub priority: String,
    pub scheduled_at: Option<String>,
    pub sent_at: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Announcement {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Announcement {
            id: row.get("id")?,
            title: row.get("title")?,
            message: row.get("message")?,
            priority: row.get("priority")?,
            scheduled_at: row.get("scheduled_at")?,
            sent_at: row.get("sent_at")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(
        pool: &DbPool,
        title: Option<&str>,
        message: &str,
        priority: Option<&str>,
    ) -> Result<i64, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO announcements (title, message, priority) VALUES (?1, ?2, ?3)",
            params![
                title.unwrap_or("Announcement"),
                message,
                priority.unwrap_or("normal"),
            ],
        )
        .map_err(|e| e.to_string())?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent first; id breaks same-second ties.
    pub fn list(pool: &DbPool) -> Result<Vec<Self>, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        let mut stmt = conn
            .prepare("SELECT * FROM announcements ORDER BY created_at DESC, id DESC")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(|e| e.to_string())?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| e.to_string())
    }

    /// No existence pre-check: deleting a missing id is indistinguishable
    /// from a successful delete.
    pub fn delete(pool: &DbPool, id: i64) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM announcements WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn count(pool: &DbPool) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row("SELECT COUNT(*) FROM announcements", [], |row| row.get(0))
            .unwrap_or(0)
    }
}
