//! Output error and summary types

use crate::storage::StorageError;
use crate::syllabus::{LectureCategory, LectureDetails, LectureNameUrl};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("No scrape runs found in database")]
    NoRuns,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything recorded for one scrape run
#[derive(Debug, Clone, Default)]
pub struct SyllabusSummary {
    // Run metadata
    pub run_id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub status: String,
    pub listing_url: String,
    pub config_hash: String,

    /// Lectures per category, in listing order
    pub lectures: BTreeMap<LectureCategory, Vec<LectureNameUrl>>,

    /// Sessions keyed by lecture name
    pub details: LectureDetails,
}

impl SyllabusSummary {
    /// Number of listed lectures across all categories
    pub fn total_lectures(&self) -> usize {
        self.lectures.values().map(Vec::len).sum()
    }

    /// Number of session records across all lectures
    pub fn total_sessions(&self) -> usize {
        self.details.values().map(Vec::len).sum()
    }
}
