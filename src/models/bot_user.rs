use chrono::NaiveDateTime;
use rusqlite::{params, Row};
use serde::Serialize;

use crate::db::DbPool;

#[derive(Debug, Serialize)]
pub struct BotUser {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_active: NaiveDateTime,
}

impl BotUser {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(BotUser {
            id: row.get("id")?,
            telegram_id: row.get("telegram_id")?,
            username: row.get("username")?,
            created_at: row.get("created_at")?,
            last_active: row.get("last_active")?,
        })
    }

    /// Register-or-touch in one conditional write: first sight inserts
    /// the row, every later call only refreshes last_active. Safe to
    /// call on every bot interaction.
    pub fn register(pool: &DbPool, telegram_id: i64, username: Option<&str>) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO users (telegram_id, username) VALUES (?1, ?2)
             ON CONFLICT(telegram_id) DO UPDATE SET last_active = datetime('now')",
            params![telegram_id, username],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn find_by_telegram_id(pool: &DbPool, telegram_id: i64) -> Option<Self> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT * FROM users WHERE telegram_id = ?1",
            params![telegram_id],
            Self::from_row,
        )
        .ok()
    }

    pub fn count(pool: &DbPool) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap_or(0)
    }
}
