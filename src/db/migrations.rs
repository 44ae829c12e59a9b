use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            completed_at TEXT NOT NULL UNIQUE,
            duration_min INTEGER DEFAULT 0,
            plan_id      TEXT,
            day_index    INTEGER,
            day_label    TEXT,
            exercises    TEXT NOT NULL DEFAULT '[]',
            created_at   TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date DESC);

        CREATE TABLE IF NOT EXISTS plans (
            id         TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            days       TEXT NOT NULL DEFAULT '[]',
            created_at TEXT DEFAULT (datetime('now'))
        );

        -- Single-row gamification document. The revision column is a
        -- monotonic counter checked on every write (compare-and-set).
        CREATE TABLE IF NOT EXISTS gamification (
            id       INTEGER PRIMARY KEY CHECK(id = 1),
            revision INTEGER NOT NULL DEFAULT 0,
            doc      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ",
    )?;
    Ok(())
}
