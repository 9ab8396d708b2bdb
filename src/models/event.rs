use chrono::NaiveDateTime;
use rusqlite::types::ToSql;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

/// Fixed category vocabulary surfaced to clients. Not enforced at write
/// time; an off-list category is stored as-is and merely displays
/// oddly downstream.
pub const CATEGORIES: [&str; 3] = ["Technical", "Cultural", "General"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    /// Caller-supplied opaque timestamps; the store never validates
    /// that end >= start.
    pub start_time: String,
    pub end_time: String,
    pub rules: Option<String>,
    pub is_active: bool,
    pub poster_file_id: Option<String>,
    pub poster_caption: Option<String>,
    pub hashtags: Option<String>,
    pub volunteer_contacts: Option<String>,
    pub registration_fee: Option<String>,
    pub registration_link: Option<String>,
    pub results: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub rules: Option<String>,
    pub hashtags: Option<String>,
    pub volunteer_contacts: Option<String>,
    pub poster_caption: Option<String>,
    pub poster_file_id: Option<String>,
}

/// Partial update: a field left out of the request body stays None here
/// and the stored value is untouched. The struct's field set is the
/// allow-list; nothing a client sends outside it ever reaches the SQL.
#[derive(Debug, Default, Deserialize)]
pub struct EventPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub rules: Option<String>,
    pub hashtags: Option<String>,
    pub volunteer_contacts: Option<String>,
    pub poster_caption: Option<String>,
    pub poster_file_id: Option<String>,
    pub registration_fee: Option<String>,
    pub registration_link: Option<String>,
    pub results: Option<String>,
    pub is_active: Option<bool>,
}

impl Event {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Event {
            id: row.get("id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            description: row.get("description")?,
            venue: row.get("venue")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            rules: row.get("rules")?,
            is_active: row.get("is_active")?,
            poster_file_id: row.get("poster_file_id")?,
            poster_caption: row.get("poster_caption")?,
            hashtags: row.get("hashtags")?,
            volunteer_contacts: row.get("volunteer_contacts")?,
            registration_fee: row.get("registration_fee")?,
            registration_link: row.get("registration_link")?,
            results: row.get("results")?,
            created_at: row.get("created_at")?,
        })
    }

    /// List events ordered by start_time ascending. Filters compose
    /// with AND: `active_only` restricts to is_active rows, `category`
    /// to an exact match.
    pub fn list(
        pool: &DbPool,
        category: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Self>, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        let mut sql = String::from("SELECT * FROM events WHERE 1=1");
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if active_only {
            sql.push_str(" AND is_active = 1");
        }
        if let Some(cat) = category {
            sql.push_str(" AND category = ?");
            values.push(Box::new(cat.to_string()));
        }
        sql.push_str(" ORDER BY start_time ASC");

        let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
        let params_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), Self::from_row)
            .map_err(|e| e.to_string())?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| e.to_string())
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> Option<Self> {
        let conn = pool.get().ok()?;
        conn.query_row("SELECT * FROM events WHERE id = ?1", params![id], Self::from_row)
            .ok()
    }

    pub fn create(pool: &DbPool, form: &EventForm) -> Result<i64, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        conn.execute(
            "INSERT INTO events (name, category, description, venue, start_time, end_time,
                                 rules, hashtags, volunteer_contacts, poster_caption, poster_file_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                form.name,
                form.category,
                form.description,
                form.venue,
                form.start_time,
                form.end_time,
                form.rules,
                form.hashtags,
                form.volunteer_contacts,
                form.poster_caption,
                form.poster_file_id,
            ],
        )
        .map_err(|e| e.to_string())?;

        Ok(conn.last_insert_rowid())
    }

    /// Apply only the fields present in the patch. Returns false (and
    /// writes nothing) when no row matches `id`; an all-absent patch on
    /// an existing row is a successful no-op.
    pub fn update(pool: &DbPool, id: i64, patch: &EventPatch) -> Result<bool, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        let exists: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .map_err(|e| e.to_string())?;
        if exists == 0 {
            return Ok(false);
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        let text_fields: [(&str, &Option<String>); 14] = [
            ("name = ?", &patch.name),
            ("category = ?", &patch.category),
            ("description = ?", &patch.description),
            ("venue = ?", &patch.venue),
            ("start_time = ?", &patch.start_time),
            ("end_time = ?", &patch.end_time),
            ("rules = ?", &patch.rules),
            ("hashtags = ?", &patch.hashtags),
            ("volunteer_contacts = ?", &patch.volunteer_contacts),
            ("poster_caption = ?", &patch.poster_caption),
            ("poster_file_id = ?", &patch.poster_file_id),
            ("registration_fee = ?", &patch.registration_fee),
            ("registration_link = ?", &patch.registration_link),
            ("results = ?", &patch.results),
        ];

        for (setter, value) in text_fields {
            if let Some(v) = value {
                sets.push(setter);
                values.push(Box::new(v.clone()));
            }
        }

        if let Some(active) = patch.is_active {
            sets.push("is_active = ?");
            values.push(Box::new(if active { 1i64 } else { 0i64 }));
        }

        if sets.is_empty() {
            return Ok(true);
        }

        values.push(Box::new(id));
        let sql = format!("UPDATE events SET {} WHERE id = ?", sets.join(", "));
        let params_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

        conn.execute(&sql, params_refs.as_slice())
            .map_err(|e| e.to_string())?;
        Ok(true)
    }

    /// Delete by id. Returns false when no row matches, without writing.
    pub fn delete(pool: &DbPool, id: i64) -> Result<bool, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;

        let exists: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .map_err(|e| e.to_string())?;
        if exists == 0 {
            return Ok(false);
        }

        conn.execute("DELETE FROM events WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(true)
    }

    pub fn count(pool: &DbPool) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .unwrap_or(0)
    }
}
