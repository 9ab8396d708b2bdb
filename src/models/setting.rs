use chrono::NaiveDateTime;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

#[derive(Debug, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// One entry of the batch upsert body.
#[derive(Debug, Deserialize)]
pub struct SettingEntry {
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl Setting {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Setting {
            key: row.get("key")?,
            value: row.get("value")?,
            description: row.get("description")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn get(pool: &DbPool, key: &str) -> Option<String> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .ok()
    }

    pub fn list(pool: &DbPool) -> Result<Vec<Self>, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        let mut stmt = conn
            .prepare("SELECT key, value, description, updated_at FROM settings ORDER BY key ASC")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(|e| e.to_string())?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| e.to_string())
    }

    pub fn set(
        pool: &DbPool,
        key: &str,
        value: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO settings (key, value, description) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            description = excluded.description,
                                            updated_at = datetime('now')",
            params![key, value, description],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Apply entries independently in sequence order. Entries with an
    /// empty or missing key are skipped; a failure surfaces immediately
    /// and earlier entries stay applied, since no transaction spans the
    /// batch.
    pub fn set_many(pool: &DbPool, entries: &[SettingEntry]) -> Result<(), String> {
        for entry in entries {
            let key = match entry.key.as_deref() {
                Some(k) if !k.is_empty() => k,
                _ => continue,
            };
            Self::set(pool, key, entry.value.as_deref(), entry.description.as_deref())?;
        }
        Ok(())
    }
}
