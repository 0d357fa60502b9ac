//! Configuration-driven scrape run
//!
//! Ties the pipeline to storage and output: one call scrapes the configured
//! categories, follows the lectures to their detail pages, records
//! everything as a run in the database and writes the markdown summary.

use crate::config::Config;
use crate::output::{generate_markdown_summary, generate_summary};
use crate::storage::{SqliteStorage, Storage};
use crate::syllabus::fetcher::{Fetcher, HttpFetcher};
use crate::syllabus::model::{LectureCategory, LectureInput};
use crate::syllabus::pipeline::Pipeline;
use crate::{Result, SyllabusError};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Counts of what a run stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: i64,
    /// Lectures found per category
    pub lectures: BTreeMap<LectureCategory, usize>,
    /// Lectures whose detail page was scraped
    pub lectures_with_details: usize,
    /// Session records across all scraped lectures
    pub sessions: usize,
}

/// Runs a complete scrape with an HTTP fetcher built from the configuration
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `config_hash` - Hash of the configuration file, recorded with the run
pub async fn run_scrape(config: &Config, config_hash: &str) -> Result<RunReport> {
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    run_scrape_with(config, config_hash, fetcher).await
}

/// Runs a complete scrape through `fetcher`
///
/// The run is marked failed in the database if any step errors; the
/// summary is only written for completed runs.
pub async fn run_scrape_with<F: Fetcher>(
    config: &Config,
    config_hash: &str,
    fetcher: F,
) -> Result<RunReport> {
    let mut storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
    let run_id = storage.create_run(&config.source.listing_url, config_hash)?;
    tracing::info!("Started run {}", run_id);

    match scrape(config, fetcher, &mut storage, run_id).await {
        Ok(report) => {
            storage.complete_run(run_id)?;

            let summary = generate_summary(&storage)?;
            generate_markdown_summary(&summary, Path::new(&config.output.summary_path))?;
            tracing::info!("Summary written to {}", config.output.summary_path);

            Ok(report)
        }
        Err(e) => Err(record_failure(&mut storage, run_id, e)),
    }
}

/// Marks the run failed and hands back the error that failed it
///
/// A storage error while recording the failure is logged; the scrape
/// error is what the caller sees.
fn record_failure(storage: &mut dyn Storage, run_id: i64, error: SyllabusError) -> SyllabusError {
    tracing::error!("Run {} failed: {}", run_id, error);
    if let Err(storage_error) = storage.fail_run(run_id, &error.to_string()) {
        tracing::error!("Could not mark run {} as failed: {}", run_id, storage_error);
    }
    error
}

async fn scrape<F: Fetcher>(
    config: &Config,
    fetcher: F,
    storage: &mut dyn Storage,
    run_id: i64,
) -> Result<RunReport> {
    let mut pipeline = Pipeline::with_fetcher(fetcher, &config.source.listing_url).await?;
    pipeline.scrape_lectures(&config.source.categories)?;

    let mut report = RunReport {
        run_id,
        ..RunReport::default()
    };

    for (category, lectures) in pipeline.name_and_url_of_lectures() {
        storage.save_lectures(run_id, *category, lectures)?;
        report.lectures.insert(*category, lectures.len());
    }

    if !config.source.scrape_details {
        tracing::info!("Detail scraping disabled");
        return Ok(report);
    }

    let batch = match &config.source.lectures_file {
        Some(path) => load_lecture_batch(Path::new(path))?,
        None => {
            // Repeated listing rows point at the same page; fetch it once
            let mut seen = HashSet::new();
            pipeline
                .scraped_lectures()
                .into_iter()
                .filter(|lecture| seen.insert(lecture.clone()))
                .map(LectureInput::from)
                .collect()
        }
    };

    pipeline.scrape_details(batch).await?;

    for (name, sessions) in pipeline.get_lecture_details()? {
        storage.save_sessions(run_id, name, sessions)?;
        report.lectures_with_details += 1;
        report.sessions += sessions.len();
    }

    Ok(report)
}

/// Reads a JSON lecture batch from `path`
///
/// The file is expected to hold an array of `{"name", "url"}` objects;
/// see [`LectureInput::classify_batch`] for how other shapes are treated.
pub fn load_lecture_batch(path: &Path) -> Result<Vec<LectureInput>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(LectureInput::classify_batch(&value))
}
