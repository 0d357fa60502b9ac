//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{RunRecord, RunStatus};
use crate::syllabus::{LectureCategory, LectureDetail, LectureDetails, LectureNameUrl};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

const RUN_COLUMNS: &str =
    "id, started_at, finished_at, listing_url, config_hash, status, error_message";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at `path` and initializes its schema
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        error_message: Option<&str>,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, error_message = ?3 WHERE id = ?4",
            params![status.to_db_string(), now, error_message, run_id],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        listing_url: row.get(3)?,
        config_hash: row.get(4)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(5)?)
            .unwrap_or(RunStatus::Running),
        error_message: row.get(6)?,
    })
}

impl Storage for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, listing_url: &str, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, listing_url, config_hash, status) VALUES (?1, ?2, ?3, ?4)",
            params![now, listing_url, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM runs WHERE id = ?1", RUN_COLUMNS),
                params![run_id],
                run_from_row,
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let run = self
            .conn
            .query_row(
                &format!("SELECT {} FROM runs ORDER BY id DESC LIMIT 1", RUN_COLUMNS),
                [],
                run_from_row,
            )
            .optional()?;
        Ok(run)
    }

    fn complete_run(&mut self, run_id: i64) -> StorageResult<()> {
        self.finish_run(run_id, RunStatus::Completed, None)
    }

    fn fail_run(&mut self, run_id: i64, message: &str) -> StorageResult<()> {
        self.finish_run(run_id, RunStatus::Failed, Some(message))
    }

    // ===== Lectures =====

    fn save_lectures(
        &mut self,
        run_id: i64,
        category: LectureCategory,
        lectures: &[LectureNameUrl],
    ) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM lectures WHERE run_id = ?1 AND category = ?2",
            params![run_id, category.as_str()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO lectures (run_id, category, position, name, url) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, lecture) in lectures.iter().enumerate() {
                stmt.execute(params![
                    run_id,
                    category.as_str(),
                    position as i64,
                    lecture.name,
                    lecture.url
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_lectures(
        &self,
        run_id: i64,
    ) -> StorageResult<BTreeMap<LectureCategory, Vec<LectureNameUrl>>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, name, url FROM lectures WHERE run_id = ?1 ORDER BY category, position",
        )?;

        let rows = stmt.query_map(params![run_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut lectures: BTreeMap<LectureCategory, Vec<LectureNameUrl>> = BTreeMap::new();
        for row in rows {
            let (category, name, url) = row?;
            let category =
                category
                    .parse::<LectureCategory>()
                    .map_err(|e| StorageError::CorruptRow {
                        table: "lectures",
                        message: e.to_string(),
                    })?;
            lectures
                .entry(category)
                .or_default()
                .push(LectureNameUrl { name, url });
        }

        Ok(lectures)
    }

    fn count_lectures(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM lectures WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ===== Sessions =====

    fn save_sessions(
        &mut self,
        run_id: i64,
        lecture_name: &str,
        sessions: &[LectureDetail],
    ) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM sessions WHERE run_id = ?1 AND lecture_name = ?2",
            params![run_id, lecture_name],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sessions (run_id, lecture_name, number, date, theme, content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for session in sessions {
                stmt.execute(params![
                    run_id,
                    lecture_name,
                    session.number,
                    session.date,
                    session.theme,
                    session.content
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_sessions(&self, run_id: i64) -> StorageResult<LectureDetails> {
        let mut stmt = self.conn.prepare(
            "SELECT lecture_name, number, date, theme, content FROM sessions
             WHERE run_id = ?1 ORDER BY lecture_name, number",
        )?;

        let rows = stmt.query_map(params![run_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                LectureDetail {
                    number: row.get(1)?,
                    date: row.get(2)?,
                    theme: row.get(3)?,
                    content: row.get(4)?,
                },
            ))
        })?;

        let mut details = LectureDetails::new();
        for row in rows {
            let (name, session) = row?;
            details.entry(name).or_default().push(session);
        }

        Ok(details)
    }

    fn count_sessions(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
