use chrono::NaiveDateTime;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

/// A static informational page. The content column is opaque to the
/// store: "about" holds plain text, "faq" a serialized list of Q/A
/// pairs, "emergency_contacts" a serialized list of name/phone pairs.
/// Shape is a client contract, not validated here.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentPage {
    pub key: String,
    pub content: String,
    pub updated_at: NaiveDateTime,
}

impl ContentPage {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(ContentPage {
            key: row.get("key")?,
            content: row.get("content")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn find_by_key(pool: &DbPool, key: &str) -> Option<Self> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT key, content, updated_at FROM content_pages WHERE key = ?1",
            params![key],
            Self::from_row,
        )
        .ok()
    }

    pub fn list(pool: &DbPool) -> Result<Vec<Self>, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        let mut stmt = conn
            .prepare("SELECT key, content, updated_at FROM content_pages ORDER BY key ASC")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(|e| e.to_string())?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| e.to_string())
    }

    /// Insert-or-update in a single conditional write, so two writers
    /// racing on the same key resolve to last-write-wins instead of a
    /// duplicate-key failure.
    pub fn upsert(pool: &DbPool, key: &str, content: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO content_pages (key, content) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET content = excluded.content,
                                            updated_at = datetime('now')",
            params![key, content],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Delete by key; missing keys are a silent no-op.
    pub fn delete(pool: &DbPool, key: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM content_pages WHERE key = ?1", params![key])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
