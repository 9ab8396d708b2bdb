use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use crate::db::DbPool;

#[derive(Debug, Serialize)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

impl Admin {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Admin {
            id: row.get("id")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            role: row.get("role")?,
        })
    }

    pub fn find_by_email(pool: &DbPool, email: &str) -> Option<Self> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT id, email, password_hash, role FROM admins WHERE email = ?1",
            params![email],
            Self::from_row,
        )
        .ok()
    }

    /// Bootstrap upsert keyed by email: first call creates the
    /// super_admin row, every later call only replaces the password
    /// hash. Never leaves more than one row per email. Returns true
    /// when a row was created.
    pub fn setup(pool: &DbPool, email: &str, password_hash: &str) -> Result<bool, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM admins WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| e.to_string())?;

        match existing {
            Some(_) => {
                conn.execute(
                    "UPDATE admins SET password_hash = ?1 WHERE email = ?2",
                    params![password_hash, email],
                )
                .map_err(|e| e.to_string())?;
                Ok(false)
            }
            None => {
                conn.execute(
                    "INSERT INTO admins (email, password_hash, role) VALUES (?1, ?2, 'super_admin')",
                    params![email, password_hash],
                )
                .map_err(|e| e.to_string())?;
                Ok(true)
            }
        }
    }

    pub fn count(pool: &DbPool, email: &str) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row(
            "SELECT COUNT(*) FROM admins WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )
        .unwrap_or(0)
    }
}
