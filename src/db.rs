use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::Serialize;

pub type DbPool = Pool<SqliteConnectionManager>;

pub fn init_pool(path: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder().max_size(10).build(manager)?;

    // WAL for concurrent reads; busy_timeout bounds every call that
    // lands on a locked database.
    let conn = pool.get()?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;

    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    conn.execute_batch(
        "
        -- Bot users (one row per messaging account)
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            telegram_id INTEGER UNIQUE NOT NULL,
            username TEXT,
            created_at TEXT DEFAULT (datetime('now')),
            last_active TEXT DEFAULT (datetime('now'))
        );

        -- Festival events. registration_fee / registration_link / results
        -- are added by upgrade_events_table(), not here.
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT,
            description TEXT,
            venue TEXT,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            rules TEXT,
            is_active INTEGER DEFAULT 1,
            poster_file_id TEXT,
            poster_caption TEXT,
            hashtags TEXT,
            volunteer_contacts TEXT,
            created_at TEXT DEFAULT (datetime('now'))
        );

        -- Broadcast announcements. scheduled_at / sent_at are written by
        -- the external dispatcher, never by this API.
        CREATE TABLE IF NOT EXISTS announcements (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            message TEXT NOT NULL,
            priority TEXT DEFAULT 'normal',
            scheduled_at TEXT,
            sent_at TEXT,
            created_at TEXT DEFAULT (datetime('now'))
        );

        -- Usage telemetry (append-only)
        CREATE TABLE IF NOT EXISTS telemetry (
            id INTEGER PRIMARY KEY,
            user_id INTEGER REFERENCES users(id),
            action TEXT NOT NULL,
            metadata TEXT,
            created_at TEXT DEFAULT (datetime('now'))
        );

        -- Static informational pages, keyed by a small fixed vocabulary
        CREATE TABLE IF NOT EXISTS content_pages (
            id INTEGER PRIMARY KEY,
            key TEXT UNIQUE NOT NULL,
            content TEXT NOT NULL,
            updated_at TEXT DEFAULT (datetime('now'))
        );

        -- Settings (key-value, with an optional human description)
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            description TEXT,
            updated_at TEXT DEFAULT (datetime('now'))
        );

        -- Console admins
        CREATE TABLE IF NOT EXISTS admins (
            id INTEGER PRIMARY KEY,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT DEFAULT 'viewer',
            created_at TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_events_category ON events(category);
        CREATE INDEX IF NOT EXISTS idx_events_active ON events(is_active);
        CREATE INDEX IF NOT EXISTS idx_telemetry_user ON telemetry(user_id);
        CREATE INDEX IF NOT EXISTS idx_telemetry_action ON telemetry(action);
        ",
    )?;

    Ok(())
}

pub fn seed_defaults(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    let defaults = vec![
        ("festival_name", "Festival", "Display name used by the bot"),
        ("festival_dates", "", "Human-readable festival date range"),
        (
            "bot_welcome_message",
            "Welcome! Use the menu to browse events.",
            "First message the bot sends to a new user",
        ),
    ];

    for (key, value, description) in defaults {
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value, description) VALUES (?1, ?2, ?3)",
            params![key, value, description],
        )?;
    }

    Ok(())
}

// ── Additive events-table migrator ──────────────────────────

#[derive(Debug, Serialize)]
pub struct MigrationStep {
    pub statement: String,
    pub outcome: String,
}

/// Columns that postdate the first events schema. Additive only, so
/// re-applying against an upgraded table is harmless.
const EVENTS_UPGRADES: &[&str] = &[
    "ALTER TABLE events ADD COLUMN registration_fee TEXT",
    "ALTER TABLE events ADD COLUMN registration_link TEXT",
    "ALTER TABLE events ADD COLUMN results TEXT",
];

/// Apply the additive column list to the events table. Statements are
/// attempted independently: a "duplicate column" error counts as
/// already present, any other error is recorded per statement and the
/// remaining statements still run.
pub fn upgrade_events_table(pool: &DbPool) -> Result<Vec<MigrationStep>, String> {
    let conn = pool.get().map_err(|e| e.to_string())?;

    let mut steps = Vec::with_capacity(EVENTS_UPGRADES.len());
    for sql in EVENTS_UPGRADES {
        let outcome = match conn.execute(sql, []) {
            Ok(_) => "applied".to_string(),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("duplicate column") {
                    "skipped (column already exists)".to_string()
                } else {
                    format!("failed: {}", msg)
                }
            }
        };
        steps.push(MigrationStep {
            statement: sql.to_string(),
            outcome,
        });
    }

    Ok(steps)
}
