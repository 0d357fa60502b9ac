//! Output module for generating syllabus summaries
//!
//! This module handles:
//! - Assembling a summary of the latest scrape run from storage
//! - Rendering that summary as markdown

mod markdown;
mod traits;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use traits::{OutputError, OutputResult, SyllabusSummary};

use crate::storage::Storage;

/// Generates a summary of the latest scrape run
///
/// # Returns
///
/// * `Ok(SyllabusSummary)` - Successfully generated summary
/// * `Err(OutputError::NoRuns)` - The database holds no runs yet
pub fn generate_summary(storage: &dyn Storage) -> OutputResult<SyllabusSummary> {
    let run = storage.get_latest_run()?.ok_or(OutputError::NoRuns)?;

    let lectures = storage.load_lectures(run.id)?;
    let details = storage.load_sessions(run.id)?;

    Ok(SyllabusSummary {
        run_id: run.id,
        started_at: run.started_at,
        finished_at: run.finished_at,
        status: run.status.to_db_string().to_string(),
        listing_url: run.listing_url,
        config_hash: run.config_hash,
        lectures,
        details,
    })
}
