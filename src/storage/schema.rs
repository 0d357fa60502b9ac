//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the syllabus database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track scrape runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    listing_url TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    error_message TEXT
);

-- Lectures listed per category
CREATE TABLE IF NOT EXISTS lectures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    category TEXT NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    url TEXT NOT NULL,
    UNIQUE(run_id, category, position)
);

CREATE INDEX IF NOT EXISTS idx_lectures_run ON lectures(run_id);

-- Sessions of each lecture
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    lecture_name TEXT NOT NULL,
    number INTEGER NOT NULL,
    date TEXT NOT NULL,
    theme TEXT NOT NULL,
    content TEXT NOT NULL,
    UNIQUE(run_id, lecture_name, number)
);

CREATE INDEX IF NOT EXISTS idx_sessions_run ON sessions(run_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
