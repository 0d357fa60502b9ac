//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::RunRecord;
use crate::syllabus::{LectureCategory, LectureDetail, LectureDetails, LectureNameUrl};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("Corrupt row in '{table}': {message}")]
    CorruptRow { table: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new scrape run
    ///
    /// # Arguments
    ///
    /// * `listing_url` - The listing page the run scrapes
    /// * `config_hash` - Hash of the configuration file
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, listing_url: &str, config_hash: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Marks a run as completed with a finish timestamp
    fn complete_run(&mut self, run_id: i64) -> StorageResult<()>;

    /// Marks a run as failed, recording the error
    fn fail_run(&mut self, run_id: i64, message: &str) -> StorageResult<()>;

    // ===== Lectures =====

    /// Stores the lectures of one category, replacing any stored for the same run and category
    fn save_lectures(
        &mut self,
        run_id: i64,
        category: LectureCategory,
        lectures: &[LectureNameUrl],
    ) -> StorageResult<()>;

    /// Loads the lectures of a run, per category in listing order
    fn load_lectures(
        &self,
        run_id: i64,
    ) -> StorageResult<BTreeMap<LectureCategory, Vec<LectureNameUrl>>>;

    /// Counts the lectures stored for a run
    fn count_lectures(&self, run_id: i64) -> StorageResult<u64>;

    // ===== Sessions =====

    /// Stores the sessions of one lecture, replacing any stored for the same run and lecture
    fn save_sessions(
        &mut self,
        run_id: i64,
        lecture_name: &str,
        sessions: &[LectureDetail],
    ) -> StorageResult<()>;

    /// Loads the sessions of a run keyed by lecture name
    fn load_sessions(&self, run_id: i64) -> StorageResult<LectureDetails>;

    /// Counts the sessions stored for a run
    fn count_sessions(&self, run_id: i64) -> StorageResult<u64>;
}
